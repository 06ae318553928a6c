use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, ItemStruct, LitStr, Token};

struct ControllerArgs {
    path: String,
    constructor: Option<syn::Ident>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut path = None;
        let mut constructor = None;
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "path" {
                let lit: LitStr = input.parse()?;
                path = Some(lit.value());
            } else if name == "constructor" {
                let lit: LitStr = input.parse()?;
                constructor = Some(lit.parse::<syn::Ident>()?);
            } else {
                return Err(syn::Error::new(
                    name.span(),
                    "unknown #[controller] argument, expected `path` or `constructor`",
                ));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(ControllerArgs {
            path: path.unwrap_or_default(),
            constructor,
        })
    }
}

pub fn controller_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_controller_impl(&args, &input).unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(expanded)
}

fn generate_controller_impl(args: &ControllerArgs, input: &ItemStruct) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[controller] does not support generic structs",
        ));
    }

    let struct_name = &input.ident;
    let base_path = &args.path;
    let construct = match &args.constructor {
        Some(constructor) => quote! {
            Self::#constructor().map_err(::std::convert::Into::into)
        },
        None => quote! {
            ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
        },
    };

    Ok(quote! {
        #input

        impl ::handlermap::Controller for #struct_name {
            fn instantiate() -> ::std::result::Result<Self, ::handlermap::BoxError> {
                #construct
            }
        }

        impl #struct_name {
            pub fn base_path() -> &'static str { #base_path }
        }
    })
}
