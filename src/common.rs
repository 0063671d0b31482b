use syn::{
    punctuated::Punctuated, Error, Expr, ExprLit, Ident, Lit, Meta, MetaNameValue, Result, Token,
};

pub type Args = Punctuated<Meta, Token![,]>;
pub fn ident(arg: &Meta) -> Result<&Ident> {
    let path = arg.path();
    path.get_ident()
        .ok_or_else(|| Error::new_spanned(path, "must be a bare identifier"))
}

pub fn flag(arg: &Meta) -> Result<bool> {
    match arg {
        Meta::Path(_) => Ok(true),
        Meta::NameValue(MetaNameValue {
            value:
                Expr::Lit(ExprLit {
                    lit: Lit::Bool(b), ..
                }),
            ..
        }) => Ok(b.value),
        _ => Err(Error::new_spanned(
            arg,
            "valid forms are a bare `flag` or `flag = true/false`",
        )),
    }
}
