//! Transformation behind `#[observable_default]`.
//!
//! A declaration such as `static mut launch_count: u32;` is turned into an accessor type whose
//! getter and setter read and write a key-value store, while reporting every access and
//! mutation to the observation registrar. The transformation runs in stages:
//!
//!   parse → validate → extract → emit → codegen
//!
//! Each stage is a plain function over `syn` trees, so the transformation can be driven from
//! anywhere that has tokens available (the proc-macro, a build script, tests).

pub mod codegen;
pub mod emit;
pub mod error;
pub mod extract;
pub mod parse;
pub mod validate;

use proc_macro2::TokenStream;
use quote::quote;

pub use self::{
    emit::AccessorPair,
    error::{ErrorFamily, ExpandError, TransformError},
    parse::{Arguments, Declaration},
};

use self::{codegen::codegen, emit::emit, extract::extract, parse::parse, validate::validate};

/// Expand an attribute invocation. On failure, the original item is emitted untouched
/// alongside the diagnostic.
pub fn expand(attrs: TokenStream, item: TokenStream) -> TokenStream {
    match try_expand(attrs, item.clone()) {
        Ok(tokens) => tokens,
        Err(err) => {
            let error = syn::Error::from(err).into_compile_error();

            quote! {
                #item
                #error
            }
        }
    }
}

/// Expand an attribute invocation, producing the replacement items.
pub fn try_expand(attrs: TokenStream, item: TokenStream) -> Result<TokenStream, ExpandError> {
    let ast = parse(attrs, item)?;
    Ok(transform(&ast.declaration, ast.arguments.as_ref())?)
}

/// Replace a declaration with its accessor type.
pub fn transform(
    declaration: &Declaration,
    arguments: Option<&Arguments>,
) -> Result<TokenStream, TransformError> {
    let facts = extract(validate(declaration)?, arguments)?;
    let accessors = emit(&facts);

    Ok(codegen(facts, accessors))
}

/// Produce only the getter and setter bodies for a declaration.
pub fn accessors(
    declaration: &Declaration,
    arguments: Option<&Arguments>,
) -> Result<AccessorPair, TransformError> {
    let facts = extract(validate(declaration)?, arguments)?;

    Ok(emit(&facts))
}
