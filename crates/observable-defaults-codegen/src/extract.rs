use proc_macro2::Span;
use syn::{
    Attribute, Expr, ExprAssign, ExprField, ExprPath, GenericArgument, Ident, PathArguments, Token,
    Type, TypePath, Visibility, parse::Parser, punctuated::Punctuated, spanned::Spanned,
};

use crate::{error::TransformError, parse::Arguments, validate::ValidatedDeclaration};

/// Gather everything required to emit accessors for a validated declaration.
pub fn extract(
    declaration: ValidatedDeclaration,
    arguments: Option<&Arguments>,
) -> Result<Facts, TransformError> {
    let value = match arguments {
        None => Value::Bare,
        Some(arguments) => {
            let configuration = Configuration::parse(arguments)?;
            configuration.into_value(&declaration.ty, declaration.span)?
        }
    };

    Ok(Facts {
        attrs: declaration.attrs,
        vis: declaration.vis,
        name: declaration.name,
        ty: declaration.ty,
        value,
    })
}

/// Everything known about a property once extraction has succeeded.
#[derive(Clone, Debug)]
pub struct Facts {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub ty: Type,

    /// Where the value of the property lives.
    pub value: Value,
}

#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum Value {
    /// No configuration, the store type's same-named accessors are used.
    Bare,

    /// Stored under `key`, falling back to `default` when absent.
    Required { key: Expr, default: Expr, store: Expr },

    /// Stored under `key` as `inner`, with absence reading as `None`.
    Optional { inner: Type, key: Expr, store: Expr },
}

/// Configuration supplied through the attribute argument, matched by label.
#[derive(Clone, Debug, Default)]
struct Configuration {
    key: Option<Expr>,
    default: Option<Expr>,
    store: Option<Expr>,
    span: Option<Span>,
}

impl Configuration {
    fn parse(arguments: &Arguments) -> Result<Self, TransformError> {
        let entries = Punctuated::<Expr, Token![,]>::parse_terminated
            .parse2(arguments.tokens.clone())
            .map_err(|err| TransformError::MalformedArguments(err.span()))?;

        let mut configuration = Self {
            span: Some(arguments.span),
            ..Self::default()
        };

        for entry in entries {
            let Expr::Assign(ExprAssign { left, right, .. }) = &entry else {
                return Err(TransformError::MalformedArguments(entry.span()));
            };

            let label = match &**left {
                Expr::Path(ExprPath {
                    qself: None, path, ..
                }) => path.get_ident(),
                _ => None,
            }
            .ok_or_else(|| TransformError::MalformedArguments(left.span()))?;

            let slot = if label == "key" {
                &mut configuration.key
            } else if label == "default" {
                &mut configuration.default
            } else if label == "store" {
                &mut configuration.store
            } else {
                return Err(TransformError::MalformedArguments(label.span()));
            };

            // Each label may only be provided once.
            if slot.is_some() {
                return Err(TransformError::MalformedArguments(label.span()));
            }

            *slot = Some((**right).clone());
        }

        Ok(configuration)
    }

    /// Check the configuration against the declared type of the property.
    fn into_value(self, ty: &Type, declaration_span: Span) -> Result<Value, TransformError> {
        let span = self.span.unwrap_or(declaration_span);

        let key = self.key.ok_or(TransformError::MissingRequiredField {
            field: "key",
            span,
        })?;
        let store = self.store.ok_or(TransformError::MissingRequiredField {
            field: "store",
            span,
        })?;

        if !is_store_reference(&store) {
            return Err(TransformError::UnresolvableStoreReference(store.span()));
        }

        match (option_inner(ty), self.default) {
            (Some(_), Some(default)) => Err(TransformError::OptionalWithDefaultValue(
                default.span(),
            )),
            (Some(inner), None) => Ok(Value::Optional {
                inner: inner.clone(),
                key,
                store,
            }),
            (None, Some(default)) => Ok(Value::Required {
                key,
                default,
                store,
            }),
            (None, None) => Err(TransformError::NonOptionalMissingDefaultValue(span)),
        }
    }
}

/// Whether an expression names a store without computing one, such as `STANDARD`,
/// `stores::GROUP` or `SETTINGS.store`.
fn is_store_reference(expr: &Expr) -> bool {
    match expr {
        Expr::Path(ExprPath { qself: None, .. }) => true,
        Expr::Field(ExprField { base, .. }) => is_store_reference(base),
        Expr::Paren(paren) => is_store_reference(&paren.expr),
        _ => false,
    }
}

/// If the type is `Option<T>`, produce `T`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return None;
    };

    let segment = path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    let mut arguments = arguments.args.iter();
    match (arguments.next(), arguments.next()) {
        (Some(GenericArgument::Type(inner)), None) => Some(inner),
        _ => None,
    }
}
