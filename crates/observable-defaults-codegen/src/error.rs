use proc_macro2::Span;
use syn::Error;

/// Every way a declaration can be rejected by the transform. Each variant is anchored at the
/// node which broke the rule, so the diagnostic points at the right place.
#[derive(Clone, Debug, thiserror::Error)]
pub enum TransformError {
    #[error("#[observable_default] can only be applied to a `static mut` declaration")]
    NotVariableProperty(Span),
    #[error("#[observable_default] cannot be applied to a declaration with multiple bindings")]
    MultipleBindings(Span),
    #[error(
        "#[observable_default] cannot be applied to a declaration that already has an accessor block"
    )]
    AlreadyComputed(Span),
    #[error("#[observable_default] cannot be applied to a declaration with an initial value")]
    HasInitializer(Span),
    #[error("#[observable_default] requires the declaration to bind a single plain identifier")]
    ComplexPattern(Span),

    #[error("expected arguments of the form `key = .., default = .., store = ..`")]
    MalformedArguments(Span),
    #[error("missing required argument `{field}`")]
    MissingRequiredField { field: &'static str, span: Span },
    #[error("`store` must name a store instance, such as `STANDARD` or `stores::GROUP`")]
    UnresolvableStoreReference(Span),
    #[error(
        "`default` is not allowed for an `Option` property, an absent value already reads as `None`"
    )]
    OptionalWithDefaultValue(Span),
    #[error("`default` is required for a non-`Option` property")]
    NonOptionalMissingDefaultValue(Span),
}

/// Which stage of the transform an error originates from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorFamily {
    /// The declaration itself can't be turned into accessors.
    Eligibility,
    /// The attribute argument is unusable, or disagrees with the declaration.
    Configuration,
}

impl TransformError {
    pub fn family(&self) -> ErrorFamily {
        match self {
            Self::NotVariableProperty(_)
            | Self::MultipleBindings(_)
            | Self::AlreadyComputed(_)
            | Self::HasInitializer(_)
            | Self::ComplexPattern(_) => ErrorFamily::Eligibility,
            Self::MalformedArguments(_)
            | Self::MissingRequiredField { .. }
            | Self::UnresolvableStoreReference(_)
            | Self::OptionalWithDefaultValue(_)
            | Self::NonOptionalMissingDefaultValue(_) => ErrorFamily::Configuration,
        }
    }

    /// Location the diagnostic should be reported at.
    pub fn span(&self) -> Span {
        match self {
            Self::NotVariableProperty(span)
            | Self::MultipleBindings(span)
            | Self::AlreadyComputed(span)
            | Self::HasInitializer(span)
            | Self::ComplexPattern(span)
            | Self::MalformedArguments(span)
            | Self::MissingRequiredField { span, .. }
            | Self::UnresolvableStoreReference(span)
            | Self::OptionalWithDefaultValue(span)
            | Self::NonOptionalMissingDefaultValue(span) => *span,
        }
    }
}

impl From<TransformError> for Error {
    fn from(err: TransformError) -> Self {
        Error::new(err.span(), err.to_string())
    }
}

/// Failure of a full expansion, either before the transform could run or within it.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ExpandError {
    #[error(transparent)]
    Parse(#[from] Error),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl From<ExpandError> for Error {
    fn from(err: ExpandError) -> Self {
        match err {
            ExpandError::Parse(error) => error,
            ExpandError::Transform(transform_error) => transform_error.into(),
        }
    }
}
