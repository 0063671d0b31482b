use proc_macro::TokenStream;
use syn::{parse_macro_input, Result};

mod common;

mod static_map;

#[inline]
fn result_of(doit: Result<impl Into<TokenStream>>) -> TokenStream {
    match doit {
        Ok(token_stream) => token_stream.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Rewrites a unit struct with one type parameter into a fixed-size map of
/// same-typed cells addressed by compile-time tags instead of indices.
///
/// Takes arguments in the same format as other proc_macro_attribute, eg.
/// `#[static_map(tags(X, Y, Z))]`.
///
/// Valid arguments:
/// - `tags`: required; the ordered list of tag identifiers, one generated cell
///   per tag. Tags must be distinct.
/// - `no_declare`: stop the tag marker structs from being generated, for
///   reusing markers already in scope.
///
/// The rewritten struct is `#[repr(transparent)]` over `[T; N]`, so its size
/// always equals `N * size_of::<T>()` and tags occupy no storage. Cells are
/// accessed with `get::<Tag>()`, `get_mut::<Tag>()`, `set::<Tag>(value)` and
/// `set_from::<Tag>(&value)`; the constructor takes exactly one value per tag
/// in declaration order. A wrong constructor arity or a tag outside the
/// declared set fails to compile.
///
/// ```
/// use static_map_macros::static_map;
///
/// #[static_map(tags(X, Y))]
/// struct Point2<T>;
///
/// let mut p = Point2::new(1, 2);
/// p.set::<X>(33);
/// assert_eq!(*p.get::<X>(), 33);
/// assert_eq!(*p.get::<Y>(), 2);
/// ```
///
/// Supplying a different number of initializers than declared tags does not
/// compile:
///
/// ```compile_fail,E0061
/// use static_map_macros::static_map;
///
/// #[static_map(tags(X, Y, Z))]
/// struct Point3<T>;
///
/// let p = Point3::new(1, 2);
/// ```
///
/// Neither does addressing a tag outside the declared set:
///
/// ```compile_fail,E0277
/// use static_map_macros::static_map;
///
/// #[static_map(tags(X, Y))]
/// struct Point2<T>;
///
/// struct Elsewhere;
///
/// let p = Point2::new(1, 2);
/// p.get::<Elsewhere>();
/// ```
#[proc_macro_attribute]
pub fn static_map(args: TokenStream, input: TokenStream) -> TokenStream {
    result_of(static_map::doit(
        parse_macro_input!(args),
        parse_macro_input!(input),
    ))
}
