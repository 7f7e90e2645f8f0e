//! `#[derive(Bind)]` for xmlbind.
//!
//! The derive implements `Bind` and `StructBind` for a struct, recording for
//! each field its identifier, its declared type and the raw `#[xml("...")]`
//! annotation. The annotation text is passed through untouched; it is parsed
//! by the engine at encode and decode time.
//!
//! Both spellings are accepted:
//!
//! ```ignore
//! #[derive(Bind, Default)]
//! struct Person {
//!     #[xml("person")]
//!     xml_name: xmlbind::QName,
//!     #[xml = "id,attr"]
//!     id: u32,
//!     name: String,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Lit, LitStr, Member, Meta, parse_macro_input,
    parse_quote,
};

/// Derive `Bind` and `StructBind` for a struct with named or positional
/// fields. Enums and unions are rejected.
#[proc_macro_derive(Bind, attributes(xml))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct FieldInfo {
    /// Identifier without `r#`; empty for tuple positions.
    name: String,
    tag: Option<LitStr>,
    ty: syn::Type,
    member: Member,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "#[derive(Bind)] only supports structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "#[derive(Bind)] only supports structs",
            ));
        }
    };

    let mut infos = Vec::with_capacity(fields.len());
    let mut errors: Option<syn::Error> = None;
    for (index, field) in fields.iter().enumerate() {
        let (name, member) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), Member::Named(ident.clone())),
            None => (String::new(), Member::Unnamed(syn::Index::from(index))),
        };
        match field_tag(&field.attrs) {
            Ok(tag) => infos.push(FieldInfo {
                name,
                tag,
                ty: field.ty.clone(),
                member,
            }),
            Err(err) => match &mut errors {
                Some(errors) => errors.combine(err),
                None => errors = Some(err),
            },
        }
    }
    if let Some(errors) = errors {
        return Err(errors);
    }

    let ident = &input.ident;
    let type_name = ident.unraw().to_string();

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for info in &infos {
            let ty = &info.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::xmlbind::Bind));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = infos.iter().map(|info| {
        let name = &info.name;
        let ty = &info.ty;
        let tag = match &info.tag {
            Some(lit) => quote!(::core::option::Option::Some(#lit)),
            None => quote!(::core::option::Option::None),
        };
        quote! {
            ::xmlbind::Field::new(#name, #tag, <#ty as ::xmlbind::Bind>::shape)
        }
    });

    let peek_arms = infos.iter().enumerate().map(|(index, info)| {
        let index = Literal::usize_unsuffixed(index);
        let member = &info.member;
        quote! {
            #index => ::core::option::Option::Some(::xmlbind::Bind::peek(&self.#member)),
        }
    });

    let poke_arms = infos.iter().enumerate().map(|(index, info)| {
        let index = Literal::usize_unsuffixed(index);
        let member = &info.member;
        quote! {
            #index => ::core::option::Option::Some(::xmlbind::Bind::poke(&mut self.#member)),
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::xmlbind::Bind for #ident #ty_generics #where_clause {
            fn shape() -> ::xmlbind::Shape {
                ::xmlbind::Shape::structure(<Self as ::xmlbind::StructBind>::describe())
            }

            fn peek(&self) -> ::xmlbind::Peek<'_> {
                ::xmlbind::Peek::Struct(self)
            }

            fn poke(&mut self) -> ::xmlbind::Poke<'_> {
                ::xmlbind::Poke::Struct(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::xmlbind::StructBind for #ident #ty_generics #where_clause {
            fn describe() -> ::xmlbind::StructType {
                ::xmlbind::StructType::new(#type_name, ::std::vec![#(#descriptors),*])
            }

            fn struct_type(&self) -> ::xmlbind::StructType {
                <Self as ::xmlbind::StructBind>::describe()
            }

            fn field(&self, index: usize) -> ::core::option::Option<::xmlbind::Peek<'_>> {
                match index {
                    #(#peek_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<::xmlbind::Poke<'_>> {
                match index {
                    #(#poke_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// The field's annotation, from either `#[xml("...")]` or `#[xml = "..."]`.
fn field_tag(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut tag = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("xml")) {
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[xml] attribute"));
        }
        let lit = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal, e.g. #[xml = \"name,attr\"]",
                    ));
                }
            },
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected an annotation string, e.g. #[xml(\"name,attr\")]",
                ));
            }
        };
        tag = Some(lit);
    }
    Ok(tag)
}
