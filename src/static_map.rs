use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    parse::Parser, punctuated::Punctuated, Error, Fields, Ident, ItemStruct, Meta, MetaList,
    Result, Token,
};

use tap::prelude::*;

use crate::common::{flag, ident, Args};

pub fn doit(args: TokenStream, item: ItemStruct) -> Result<TokenStream> {
    let args = Args::parse_terminated.parse2(args)?;
    let params = Params::try_from(args)?;
    let Config { tags, declare } = Config::new(params)?;

    let ItemStruct {
        attrs,
        vis,
        struct_token: _,
        ident,
        generics,
        fields,
        semi_token: _,
    } = &item;

    match fields {
        Fields::Unit => {}
        Fields::Named(named) => Err(Error::new(
            named.brace_token.span.join(),
            "must be a unit struct; cell storage is generated",
        ))?,
        Fields::Unnamed(unnamed) => Err(Error::new(
            unnamed.paren_token.span.join(),
            "must be a unit struct; cell storage is generated",
        ))?,
    }

    let mut type_params = generics.type_params();
    let elem = match (type_params.next(), type_params.next()) {
        (Some(param), None) => param.ident.clone(),
        _ => Err(Error::new_spanned(
            ident,
            "exactly one type parameter (the element type) is required",
        ))?,
    };
    if elem == "N" {
        Err(Error::new_spanned(
            ident,
            "the element type parameter may not be named `N`; the generated accessors use it",
        ))?
    }
    if let Some(tag) = tags.iter().find(|tag| **tag == elem) {
        Err(Error::new_spanned(
            tag,
            "tag shadows the element type parameter",
        ))?
    }
    if let Some(tag) = tags.iter().find(|tag| *tag == ident) {
        Err(Error::new_spanned(
            tag,
            "tag collides with the container's name",
        ))?
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let tags = &tags;
    let len = tags.len();
    let indices: Vec<usize> = (0..len).collect();
    let ctor_args: Vec<Ident> = (0..len).map(|i| format_ident!("v{i}")).collect();

    let marker_defs = if declare {
        let docs = tags
            .iter()
            .map(|tag| format!("Tag addressing the `{tag}` cell of [`{ident}`]. Never constructed."));
        quote! { #( #[doc = #docs] #vis struct #tags; )* }
    } else {
        quote!()
    };

    quote! {
        #(#attrs)*
        #[repr(transparent)]
        #vis struct #ident #generics ([#elem; #len]) #where_clause;

        #marker_defs

        impl #impl_generics #ident #ty_generics #where_clause {
            /// One value per declared tag, in tag declaration order.
            #vis fn new(#(#ctor_args: #elem),*) -> Self {
                Self([#(#ctor_args),*])
            }

            /// Reads the cell addressed by `N`.
            #[inline]
            #vis fn get<N>(&self) -> &#elem
            where
                Self: ::static_map::Cell<N, Value = #elem>,
            {
                <Self as ::static_map::Cell<N>>::cell(self)
            }

            #[inline]
            #vis fn get_mut<N>(&mut self) -> &mut #elem
            where
                Self: ::static_map::Cell<N, Value = #elem>,
            {
                <Self as ::static_map::Cell<N>>::cell_mut(self)
            }

            /// Replaces the cell addressed by `N`, taking the value by move.
            #[inline]
            #vis fn set<N>(&mut self, value: #elem)
            where
                Self: ::static_map::Cell<N, Value = #elem>,
            {
                *<Self as ::static_map::Cell<N>>::cell_mut(self) = value;
            }

            /// Replaces the cell addressed by `N` with a clone of `value`.
            #[inline]
            #vis fn set_from<N>(&mut self, value: &#elem)
            where
                #elem: ::core::clone::Clone,
                Self: ::static_map::Cell<N, Value = #elem>,
            {
                *<Self as ::static_map::Cell<N>>::cell_mut(self) = ::core::clone::Clone::clone(value);
            }

            #[inline]
            #vis fn as_array(&self) -> &[#elem; #len] {
                &self.0
            }

            #[inline]
            #vis fn into_array(self) -> [#elem; #len] {
                self.0
            }
        }

        impl #impl_generics ::static_map::TagSet for #ident #ty_generics #where_clause {
            const LEN: usize = #len;
        }

        #(
            impl #impl_generics ::static_map::Cell<#tags> for #ident #ty_generics #where_clause {
                type Value = #elem;

                #[inline]
                fn cell(&self) -> &#elem {
                    &self.0[#indices]
                }

                #[inline]
                fn cell_mut(&mut self) -> &mut #elem {
                    &mut self.0[#indices]
                }
            }
        )*
    }
    .pipe(Ok)
}

struct Config {
    tags: Vec<Ident>,
    declare: bool,
}
impl Config {
    fn new(Params { tags, no_declare }: Params) -> Result<Self> {
        Ok(Self {
            tags: tags.ok_or_else(|| {
                Error::new(Span::call_site(), "missing required `tags(...)` parameter")
            })?,
            declare: !no_declare.unwrap_or_default(),
        })
    }
}

#[derive(Default)]
struct Params {
    tags: Option<Vec<Ident>>,
    no_declare: Option<bool>,
}

impl TryFrom<Args> for Params {
    type Error = Error;
    fn try_from(args: Args) -> std::result::Result<Self, Self::Error> {
        let mut params = Params::default();
        for arg in args {
            let key = ident(&arg)?.clone();
            match key.to_string().as_str() {
                "tags" => {
                    macro_rules! error {
                        ($tokens:expr) => {
                            Error::new_spanned(
                                $tokens,
                                "valid form is `tags(First, Second, ...)` with at least one tag",
                            )
                        };
                    }
                    params.tags = Some(match &arg {
                        Meta::List(MetaList { tokens, .. }) => {
                            let list = Punctuated::<Ident, Token![,]>::parse_terminated
                                .parse2(tokens.clone())
                                .map_err(|mut err| {
                                    err.combine(error!(tokens));
                                    err
                                })?;
                            if list.is_empty() {
                                Err(error!(&arg))?
                            }
                            let mut tags: Vec<Ident> = Vec::with_capacity(list.len());
                            for tag in list {
                                if tags.contains(&tag) {
                                    Err(Error::new_spanned(
                                        &tag,
                                        format!("duplicate tag `{tag}`; tags must be distinct"),
                                    ))?
                                }
                                tags.push(tag);
                            }
                            tags
                        }
                        _ => Err(error!(&arg))?,
                    })
                }
                "no_declare" => params.no_declare = Some(flag(&arg)?),
                _ => Err(Error::new_spanned(
                    key,
                    "static_map: unrecognized parameter",
                ))?,
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::doit;
    use proc_macro2::TokenStream;
    use quote::quote;

    fn expand(args: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
        doit(args, syn::parse2(item).unwrap())
    }

    #[test]
    fn generates_transparent_array_storage() {
        let out = expand(quote!(tags(X, Y)), quote!(pub struct Point2<T>;))
            .unwrap()
            .to_string();
        assert!(out.contains("transparent"));
        assert!(out.contains("LEN : usize = 2usize"));
        assert!(out.contains("struct X"));
        assert!(out.contains("struct Y"));
    }

    #[test]
    fn no_declare_skips_marker_definitions() {
        let out = expand(quote!(tags(X, Y), no_declare), quote!(struct Point2<T>;))
            .unwrap()
            .to_string();
        assert!(!out.contains("struct X"));
    }

    #[test]
    fn rejects_duplicate_tags() {
        let err = expand(quote!(tags(X, X)), quote!(struct Point2<T>;)).unwrap_err();
        assert!(err.to_string().contains("duplicate tag"));
    }

    #[test]
    fn rejects_missing_tag_list() {
        let err = expand(quote!(), quote!(struct Point2<T>;)).unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn rejects_empty_tag_list() {
        let err = expand(quote!(tags()), quote!(struct Point2<T>;)).unwrap_err();
        assert!(err.to_string().contains("at least one tag"));
    }

    #[test]
    fn rejects_field_bearing_structs() {
        let err = expand(quote!(tags(X)), quote!(struct P<T> { x: T })).unwrap_err();
        assert!(err.to_string().contains("unit struct"));
    }

    #[test]
    fn rejects_missing_element_parameter() {
        let err = expand(quote!(tags(X)), quote!(struct P;)).unwrap_err();
        assert!(err.to_string().contains("type parameter"));
    }

    #[test]
    fn rejects_tag_shadowing_element_parameter() {
        let err = expand(quote!(tags(T)), quote!(struct P<T>;)).unwrap_err();
        assert!(err.to_string().contains("shadows"));
    }

    #[test]
    fn rejects_tag_matching_the_container_name() {
        let err = expand(quote!(tags(X, Point2)), quote!(struct Point2<T>;)).unwrap_err();
        assert!(err.to_string().contains("container"));
    }

    #[test]
    fn rejects_unrecognized_parameter() {
        let err = expand(quote!(tags(X), frobnicate), quote!(struct P<T>;)).unwrap_err();
        assert!(err.to_string().contains("unrecognized"));
    }
}
