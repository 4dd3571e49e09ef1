mod singleton;

#[proc_macro_derive(Singleton, attributes(singleton))]
pub fn derive_singleton(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    singleton::expand(input)
}
