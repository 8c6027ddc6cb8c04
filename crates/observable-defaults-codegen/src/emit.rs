use quote::format_ident;
use syn::{Block, Expr, Ident, Path, ext::IdentExt, parse_quote};

use crate::extract::{Facts, Value};

/// Produce the bodies of the getter and setter for a property.
///
/// Both bodies report to the observation registrar. The setter's write happens inside the
/// mutation report, so observers see the transition as a single event.
pub fn emit(facts: &Facts) -> AccessorPair {
    let property = facts.name.unraw().to_string();

    // Must match the parameter name of the generated setter.
    let new_value: Ident = parse_quote!(new_value);

    let registrar: Expr = parse_quote!(::observable_defaults::observation::registrar());
    let store_trait: Path = parse_quote!(::observable_defaults::store::Store);

    let (read, write): (Expr, Expr) = match &facts.value {
        Value::Bare => {
            let getter = &facts.name;
            let setter = format_ident!("set_{}", facts.name);

            (
                parse_quote!(Defaults::#getter()),
                parse_quote!(Defaults::#setter(#new_value)),
            )
        }
        Value::Required {
            key,
            default,
            store,
        } => {
            let ty = &facts.ty;

            (
                parse_quote! {
                    #store_trait::get::<#ty>(&#store, #key).unwrap_or_else(|| #default)
                },
                parse_quote!(#store_trait::set::<#ty>(&#store, #key, #new_value)),
            )
        }
        Value::Optional { inner, key, store } => {
            let ty = &facts.ty;

            (
                parse_quote!(#store_trait::get::<#inner>(&#store, #key)),
                parse_quote!(#store_trait::set::<#ty>(&#store, #key, #new_value)),
            )
        }
    };

    AccessorPair {
        getter: parse_quote!({
            #registrar.access(#property);
            #read
        }),
        setter: parse_quote!({
            #registrar.with_mutation(#property, move || #write);
        }),
    }
}

/// Synthesised bodies of a property's accessors. The setter expects the incoming value to be
/// bound as `new_value`.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AccessorPair {
    pub getter: Block,
    pub setter: Block,
}

#[cfg(test)]
mod test {
    use super::*;

    use proc_macro2::TokenStream;
    use quote::{ToTokens, quote};
    use rstest::*;

    use crate::{extract::extract, parse::Arguments, validate::validate};

    fn facts(declaration: TokenStream, arguments: TokenStream) -> Facts {
        let declaration = validate(&syn::parse2(declaration).unwrap()).unwrap();
        extract(declaration, Arguments::new(arguments).as_ref()).unwrap()
    }

    #[rstest]
    #[case::bare(
        quote!(static mut name: String;),
        quote!(),
        parse_quote!({
            ::observable_defaults::observation::registrar().access("name");
            Defaults::name()
        }),
        parse_quote!({
            ::observable_defaults::observation::registrar()
                .with_mutation("name", move || Defaults::set_name(new_value));
        })
    )]
    #[case::bare_raw_ident(
        quote!(static mut r#type: String;),
        quote!(),
        parse_quote!({
            ::observable_defaults::observation::registrar().access("type");
            Defaults::r#type()
        }),
        parse_quote!({
            ::observable_defaults::observation::registrar()
                .with_mutation("type", move || Defaults::set_type(new_value));
        })
    )]
    #[case::required(
        quote!(static mut number: i32;),
        quote!(key = "K", default = 5, store = STANDARD),
        parse_quote!({
            ::observable_defaults::observation::registrar().access("number");
            ::observable_defaults::store::Store::get::<i32>(&STANDARD, "K").unwrap_or_else(|| 5)
        }),
        parse_quote!({
            ::observable_defaults::observation::registrar().with_mutation(
                "number",
                move || ::observable_defaults::store::Store::set::<i32>(&STANDARD, "K", new_value)
            );
        })
    )]
    #[case::optional(
        quote!(static mut number: Option<i32>;),
        quote!(key = "K", store = stores::GROUP),
        parse_quote!({
            ::observable_defaults::observation::registrar().access("number");
            ::observable_defaults::store::Store::get::<i32>(&stores::GROUP, "K")
        }),
        parse_quote!({
            ::observable_defaults::observation::registrar().with_mutation(
                "number",
                move || ::observable_defaults::store::Store::set::<Option<i32>>(&stores::GROUP, "K", new_value)
            );
        })
    )]
    fn accessors(
        #[case] declaration: TokenStream,
        #[case] arguments: TokenStream,
        #[case] getter: Block,
        #[case] setter: Block,
    ) {
        let accessors = emit(&facts(declaration, arguments));

        assert_eq!(accessors, AccessorPair { getter, setter });
    }

    #[test]
    fn optional_has_no_fallback() {
        let accessors = emit(&facts(
            quote!(static mut nickname: Option<String>;),
            quote!(key = "nickname", store = STANDARD),
        ));

        let getter = accessors.getter.to_token_stream().to_string();
        assert!(!getter.contains("unwrap_or_else"));
    }

    #[rstest]
    #[case::bare(quote!(static mut name: String;), quote!())]
    #[case::required(quote!(static mut number: i32;), quote!(key = "K", default = 5, store = STANDARD))]
    #[case::optional(quote!(static mut number: Option<i32>;), quote!(key = "K", store = STANDARD))]
    fn idempotent(#[case] declaration: TokenStream, #[case] arguments: TokenStream) {
        let first = emit(&facts(declaration.clone(), arguments.clone()));
        let second = emit(&facts(declaration, arguments));

        assert_eq!(
            first.getter.to_token_stream().to_string(),
            second.getter.to_token_stream().to_string()
        );
        assert_eq!(
            first.setter.to_token_stream().to_string(),
            second.setter.to_token_stream().to_string()
        );
    }

    #[rstest]
    #[case::bare(quote!(static mut name: String;), quote!())]
    #[case::required(quote!(static mut number: i32;), quote!(key = "K", default = 5, store = STANDARD))]
    #[case::optional(quote!(static mut number: Option<i32>;), quote!(key = "K", store = STANDARD))]
    fn write_happens_inside_mutation_report(
        #[case] declaration: TokenStream,
        #[case] arguments: TokenStream,
    ) {
        let accessors = emit(&facts(declaration, arguments));

        // The setter is a single statement, the mutation report, whose closure performs the
        // write.
        let [syn::Stmt::Expr(Expr::MethodCall(report), Some(_))] = accessors.setter.stmts.as_slice()
        else {
            panic!("setter should consist of the mutation report");
        };
        assert_eq!(report.method, "with_mutation");

        let Some(Expr::Closure(closure)) = report.args.iter().nth(1) else {
            panic!("mutation report should wrap the write in a closure");
        };
        assert!(closure.body.to_token_stream().to_string().contains("new_value"));
    }
}
