use proc_macro2::TokenStream;

const SINGLETON_ATTR: &str = "singleton";

#[derive(Default)]
struct SingletonArgs {
    constructor: Option<syn::Path>,
    error: Option<syn::Type>,
}

fn parse_args(attrs: &[syn::Attribute]) -> syn::Result<SingletonArgs> {
    let mut args = SingletonArgs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident(SINGLETON_ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("constructor") {
                args.constructor = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("error") {
                args.error = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `constructor` or `error`"))
            }
        })?;
    }
    Ok(args)
}

pub fn expand(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    let name = &input.ident;
    if let syn::Data::Union(_) = &input.data {
        panic!("#[derive(Singleton)] is not defined for unions");
    }
    if !input.generics.params.is_empty() {
        panic!("#[derive(Singleton)] needs a concrete type, `{name}` is generic");
    }

    let args = match parse_args(&input.attrs) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let (error_ty, construct): (TokenStream, TokenStream) = match (args.constructor, args.error) {
        (None, None) => (
            quote::quote! { ::core::convert::Infallible },
            quote::quote! { ::core::result::Result::Ok(<Self as ::core::default::Default>::default()) },
        ),
        (Some(ctor), None) => (
            quote::quote! { ::core::convert::Infallible },
            quote::quote! { ::core::result::Result::Ok(#ctor()) },
        ),
        (Some(ctor), Some(error)) => (quote::quote! { #error }, quote::quote! { #ctor() }),
        (None, Some(_)) => {
            return syn::Error::new_spanned(
                name,
                "#[singleton(error = ..)] requires #[singleton(constructor = ..)]",
            )
            .to_compile_error()
            .into();
        }
    };

    quote::quote! {
        impl ::solus_utils::singleton::Singleton for #name {
            type Error = #error_ty;

            fn slot() -> &'static ::solus_utils::global_instance::GlobalInstance<Self> {
                static SLOT: ::solus_utils::global_instance::GlobalInstance<#name> =
                    ::solus_utils::global_instance::GlobalInstance::new();
                &SLOT
            }

            fn construct() -> ::core::result::Result<Self, Self::Error> {
                #construct
            }
        }
    }
    .into()
}
