use proc_macro2::{Span, TokenStream};
use syn::{
    Attribute, Block, Error, Expr, Ident, Pat, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    token::Brace,
};

pub fn parse(tokens_attrs: TokenStream, tokens_item: TokenStream) -> Result<Ast, Error> {
    let arguments = Arguments::new(tokens_attrs);
    let declaration = syn::parse2(tokens_item)?;

    Ok(Ast {
        arguments,
        declaration,
    })
}

/// Raw input of the macro, before anything has been checked.
#[derive(Clone, Debug)]
pub struct Ast {
    /// Argument list of the attribute, if one was provided.
    pub arguments: Option<Arguments>,

    /// The item the attribute is attached to.
    pub declaration: Declaration,
}

/// Tokens between the parentheses of `#[observable_default(..)]`. Interpreting them is left to
/// extraction, so that a bad argument list produces a precise error rather than a parse
/// failure.
#[derive(Clone, Debug)]
pub struct Arguments {
    pub tokens: TokenStream,
    pub span: Span,
}

impl Arguments {
    /// Wrap the attribute tokens, returning `None` if there were none at all.
    pub fn new(tokens: TokenStream) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }

        Some(Self {
            span: tokens.span(),
            tokens,
        })
    }
}

/// A declaration the attribute may be attached to.
///
/// The grammar is looser than what the transform accepts, so that every ineligible shape can
/// be rejected with its own diagnostic:
///
/// ```text
/// Declaration := OuterAttribute* Visibility Binder Binding ("," Binding)* (Block | ";")
/// Binder      := "static" "mut"? | "const" | <any other item>
/// Binding     := Pattern ":" Type ("=" Expr)?
/// ```
#[derive(Clone, Debug)]
pub struct Declaration {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub binder: Binder,

    /// Empty when the binder is [`Binder::Other`].
    pub bindings: Punctuated<Binding, Token![,]>,

    /// Block following the bindings, in place of the closing `;`.
    pub accessor_block: Option<Block>,
}

#[derive(Clone, Debug)]
pub enum Binder {
    Static {
        static_token: Token![static],
        mutability: Option<Token![mut]>,
    },
    Const(Token![const]),

    /// Any item that isn't a `static` or `const`, such as a function or struct.
    Other(Span),
}

impl Binder {
    pub fn span(&self) -> Span {
        match self {
            Self::Static {
                static_token,
                mutability,
            } => mutability
                .as_ref()
                .map(|mutability| mutability.span)
                .unwrap_or(static_token.span),
            Self::Const(const_token) => const_token.span,
            Self::Other(span) => *span,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub pat: Pat,
    pub colon_token: Token![:],
    pub ty: Type,

    /// Inline initial value (`= expr`).
    pub init: Option<(Token![=], Box<Expr>)>,
}

impl Parse for Declaration {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;

        let binder = if input.peek(Token![static]) {
            Binder::Static {
                static_token: input.parse()?,
                mutability: input.parse()?,
            }
        } else if input.peek(Token![const]) && (input.peek2(Ident) || input.peek2(Token![_])) {
            Binder::Const(input.parse()?)
        } else {
            // Keep the rest of the item around only for its location.
            let rest = input.parse::<TokenStream>()?;
            let span = if rest.is_empty() {
                input.span()
            } else {
                rest.span()
            };

            return Ok(Self {
                attrs,
                vis,
                binder: Binder::Other(span),
                bindings: Punctuated::new(),
                accessor_block: None,
            });
        };

        let mut bindings = Punctuated::new();
        loop {
            bindings.push_value(input.parse()?);

            if !input.peek(Token![,]) {
                break;
            }
            bindings.push_punct(input.parse()?);
        }

        let accessor_block = if input.peek(Brace) {
            let block = input.parse()?;
            input.parse::<Option<Token![;]>>()?;
            Some(block)
        } else {
            input.parse::<Token![;]>()?;
            None
        };

        Ok(Self {
            attrs,
            vis,
            binder,
            bindings,
            accessor_block,
        })
    }
}

impl Parse for Binding {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let pat = Pat::parse_single(input)?;
        let colon_token = input.parse()?;
        let ty = input.parse()?;

        let init = if input.peek(Token![=]) {
            let eq_token = input.parse()?;
            let expr = parse_initializer(input)?;
            Some((eq_token, Box::new(expr)))
        } else {
            None
        };

        Ok(Self {
            pat,
            colon_token,
            ty,
            init,
        })
    }
}

/// Parse the value after `=`. Braces are read as part of the value (such as a struct literal)
/// when the binding ends straight after them, otherwise they open an accessor block.
fn parse_initializer(input: ParseStream) -> syn::Result<Expr> {
    let fork = input.fork();
    let ends_binding = fork.parse::<Expr>().is_ok()
        && (fork.is_empty() || fork.peek(Token![;]) || fork.peek(Token![,]));

    if ends_binding {
        input.parse()
    } else {
        Expr::parse_without_eager_brace(input)
    }
}
