use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, FnArg, ImplItem, ImplItemFn,
    ItemImpl, LitStr, Token,
};

const METHOD_SHORTHANDS: [&str; 8] = [
    "get", "head", "post", "put", "patch", "delete", "options", "trace",
];

/// `("/path", method = [GET, POST])`, also accepting `value = "/path"`
/// and a single `method = GET`.
struct RequestMappingArgs {
    path: String,
    methods: Vec<syn::Ident>,
}

impl Parse for RequestMappingArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut path = None;
        let mut methods = Vec::new();

        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            path = Some(lit.value());
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "value" || name == "path" {
                let lit: LitStr = input.parse()?;
                path = Some(lit.value());
            } else if name == "method" {
                if input.peek(syn::token::Bracket) {
                    let content;
                    syn::bracketed!(content in input);
                    let items = content.parse_terminated(syn::Path::parse, Token![,])?;
                    for item in items {
                        methods.push(method_variant(&item)?);
                    }
                } else {
                    let item: syn::Path = input.parse()?;
                    methods.push(method_variant(&item)?);
                }
            } else {
                return Err(syn::Error::new(
                    name.span(),
                    "unknown #[request_mapping] argument, expected `value` or `method`",
                ));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(RequestMappingArgs {
            path: path.unwrap_or_default(),
            methods,
        })
    }
}

/// Maps `GET`, `get` or `RequestMethod::GET` onto the `RequestMethod` variant.
fn method_variant(path: &syn::Path) -> syn::Result<syn::Ident> {
    let ident = path
        .segments
        .last()
        .map(|segment| segment.ident.to_string().to_lowercase())
        .unwrap_or_default();
    if !METHOD_SHORTHANDS.contains(&ident.as_str()) {
        return Err(syn::Error::new_spanned(
            path,
            "unknown request method, expected one of GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS, TRACE",
        ));
    }
    let mut chars = ident.chars();
    let variant = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    Ok(syn::Ident::new(&variant, Span::call_site()))
}

struct RouteInfo {
    path: String,
    methods: Vec<syn::Ident>,
    fn_name: syn::Ident,
    has_receiver: bool,
}

pub fn routes_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    let expanded = generate_routes_impl(input).unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(expanded)
}

fn generate_routes_impl(mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if input.trait_.is_some() {
        return Err(syn::Error::new_spanned(
            &input.self_ty,
            "#[routes] must be placed on an inherent impl block",
        ));
    }

    let controller_name = match &*input.self_ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "#[routes] expects a named controller type",
            ))
        }
    };

    let mut routes: Vec<RouteInfo> = Vec::new();
    for item in input.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            routes.extend(extract_route_info(method)?);
            method.attrs.retain(|attr| !is_mapping_attr(attr));
        }
    }

    let self_ty = &input.self_ty;
    let handler_methods = routes.iter().map(|route| {
        let path = &route.path;
        let fn_name = &route.fn_name;
        let method_name = fn_name.to_string();
        let methods = &route.methods;
        let call = if route.has_receiver {
            quote! { <#self_ty>::#fn_name }
        } else {
            quote! { |_, __req, __res| <#self_ty>::#fn_name(__req, __res) }
        };

        quote! {
            ::handlermap::HandlerMethod::new(
                ::handlermap::handler::join_path(<#self_ty>::base_path(), #path),
                &[#(::handlermap::RequestMethod::#methods),*],
                ::handlermap::HandlerExecution::new(#controller_name, #method_name, |__req, __res| {
                    ::handlermap::handler::invoke::<#self_ty, _>(
                        #controller_name,
                        #method_name,
                        __req,
                        __res,
                        #call,
                    )
                }),
            )
        }
    });

    Ok(quote! {
        #input

        ::handlermap::inventory::submit! {
            ::handlermap::ControllerRegistration::new(
                ::core::module_path!(),
                #controller_name,
                ::core::line!(),
                || ::std::vec![#(#handler_methods),*],
            )
        }
    })
}

fn extract_route_info(method: &ImplItemFn) -> syn::Result<Vec<RouteInfo>> {
    let has_receiver = matches!(method.sig.inputs.first(), Some(FnArg::Receiver(_)));
    let mut routes = Vec::new();

    for attr in &method.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let name = ident.to_string();

        let (path, methods) = if name == "request_mapping" {
            let args: RequestMappingArgs = attr.parse_args()?;
            (args.path, args.methods)
        } else if METHOD_SHORTHANDS.contains(&name.as_str()) {
            let path = match &attr.meta {
                syn::Meta::Path(_) => String::new(),
                _ => attr.parse_args::<LitStr>()?.value(),
            };
            (path, vec![method_variant(attr.path())?])
        } else {
            continue;
        };

        routes.push(RouteInfo {
            path,
            methods,
            fn_name: method.sig.ident.clone(),
            has_receiver,
        });
    }
    Ok(routes)
}

fn is_mapping_attr(attr: &Attribute) -> bool {
    attr.path().get_ident().map_or(false, |ident| {
        ident == "request_mapping" || METHOD_SHORTHANDS.contains(&ident.to_string().as_str())
    })
}
