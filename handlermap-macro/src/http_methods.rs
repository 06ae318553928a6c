use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Route markers are consumed by `#[routes]`. Used anywhere else they leave
/// the method untouched, so the method is simply not mapped.
pub fn http_method_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as syn::ImplItemFn);

    TokenStream::from(quote! {
        #input
    })
}
