/// Back a `static mut` declaration with a key-value store, reporting every read and write to
/// the observation registrar.
///
/// See `observable_defaults` for more information.
#[proc_macro_attribute]
pub fn observable_default(
    attrs: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    observable_defaults_codegen::expand(attrs.into(), item.into()).into()
}
