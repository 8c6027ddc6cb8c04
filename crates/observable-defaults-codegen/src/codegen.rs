use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Meta, Token, ext::IdentExt, parse_quote, punctuated::Punctuated};

use crate::{emit::AccessorPair, extract::Facts};

/// Build the items which replace the declaration: a type named after the property, and its
/// `Property` implementation carrying the accessors.
///
/// The type has braces so it only occupies the type namespace, leaving the property's name free
/// for locals and parameters.
pub fn codegen(facts: Facts, accessors: AccessorPair) -> TokenStream {
    let Facts {
        attrs,
        vis,
        name,
        ty,
        ..
    } = facts;
    let AccessorPair { getter, setter } = accessors;

    let property = name.unraw().to_string();

    // Conditional compilation must apply to the implementation as well as the type.
    let gates = attrs.iter().filter_map(gate);

    quote! {
        #(#attrs)*
        #[allow(non_camel_case_types)]
        #vis struct #name {}

        #(#gates)*
        impl ::observable_defaults::Property for #name {
            type Value = #ty;

            const NAME: &'static str = #property;

            fn get() -> Self::Value #getter

            fn set(new_value: Self::Value) #setter
        }
    }
}

/// The conditional compilation carried by an attribute, if any.
fn gate(attr: &Attribute) -> Option<Attribute> {
    let meta = gate_meta(&attr.meta)?;
    Some(parse_quote!(#[#meta]))
}

/// `cfg(..)` is kept whole. From `cfg_attr(predicate, ..)` only the nested gates are kept, so
/// attributes such as `derive` never end up on the implementation.
fn gate_meta(meta: &Meta) -> Option<Meta> {
    if meta.path().is_ident("cfg") {
        return Some(meta.clone());
    }

    let Meta::List(list) = meta else {
        return None;
    };
    if !list.path.is_ident("cfg_attr") {
        return None;
    }

    let metas = list
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()?;
    let mut metas = metas.iter();
    let predicate = metas.next()?;

    let gates = metas.filter_map(gate_meta).collect::<Vec<_>>();
    if gates.is_empty() {
        return None;
    }

    Some(parse_quote!(cfg_attr(#predicate, #(#gates),*)))
}
