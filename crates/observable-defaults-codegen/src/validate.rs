use proc_macro2::Span;
use syn::{Attribute, Ident, Pat, PatIdent, Type, Visibility, spanned::Spanned};

use crate::{
    error::TransformError,
    parse::{Binder, Declaration},
};

/// Check that a declaration can be turned into accessors.
///
/// Rules are applied in a fixed order and the first one broken is reported, so a declaration
/// which is both `const` and has multiple bindings is always reported as not being a variable.
pub fn validate(declaration: &Declaration) -> Result<ValidatedDeclaration, TransformError> {
    let Binder::Static {
        mutability: Some(_),
        ..
    } = declaration.binder
    else {
        return Err(TransformError::NotVariableProperty(
            declaration.binder.span(),
        ));
    };

    let mut bindings = declaration.bindings.iter();
    let (Some(binding), None) = (bindings.next(), bindings.next()) else {
        // A mutable static always has at least one binding, so this is the second one.
        let span = declaration
            .bindings
            .iter()
            .nth(1)
            .map(|binding| binding.pat.span())
            .unwrap_or_else(|| declaration.binder.span());
        return Err(TransformError::MultipleBindings(span));
    };

    if let Some(block) = &declaration.accessor_block {
        return Err(TransformError::AlreadyComputed(block.span()));
    }

    if let Some((_, init)) = &binding.init {
        return Err(TransformError::HasInitializer(init.span()));
    }

    let name = plain_ident(&binding.pat)
        .ok_or_else(|| TransformError::ComplexPattern(binding.pat.span()))?
        .clone();

    Ok(ValidatedDeclaration {
        attrs: declaration.attrs.clone(),
        vis: declaration.vis.clone(),
        span: name.span(),
        name,
        ty: binding.ty.clone(),
    })
}

/// The identifier bound by the pattern, if the pattern is nothing more than an identifier.
fn plain_ident(pat: &Pat) -> Option<&Ident> {
    match pat {
        Pat::Ident(PatIdent {
            by_ref: None,
            mutability: None,
            subpat: None,
            ident,
            ..
        }) => Some(ident),
        _ => None,
    }
}

/// A declaration which passed every eligibility rule.
#[derive(Clone, Debug)]
pub struct ValidatedDeclaration {
    /// Outer attributes, carried over to the generated item.
    pub attrs: Vec<Attribute>,

    pub vis: Visibility,

    /// Name of the property.
    pub name: Ident,

    /// Declared type of the property.
    pub ty: Type,

    pub span: Span,
}
