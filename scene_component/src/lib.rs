// scene_component/src/lib.rs
extern crate proc_macro;
use syn::punctuated::Punctuated;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use syn::parse::ParseStream;
use syn::parse::Parse;
use syn::DeriveInput;
use syn::Fields;
use syn::Token;
use syn::Data;
use syn::Type;

struct SceneComponentArgs {
    enums: Vec<Type>,
}

impl Parse for SceneComponentArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut enums = Vec::new();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;

            if ident == "enums" {
                let content;
                syn::bracketed!(content in input);
                let types: Punctuated<Type, Token![,]> =
                    content.parse_terminated(Type::parse, Token![,])?;
                enums = types.into_iter().collect();
            } else {
                return Err(syn::Error::new_spanned(ident, "Expected 'enums'"));
            }

            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        Ok(SceneComponentArgs { enums })
    }
}

/// How a member type participates in event editing.
enum TypeClass {
    /// Flat literal type with a ValueTyped impl.
    Supported,
    /// Listed in the attribute's `enums = [..]` table.
    ScriptEnum,
    /// Listed for fields but inert; disqualifying for methods.
    Unsupported,
}

/// `#[scene_component]` – generates the Component impl, the registry
/// entry, and the field member submission for a component struct.
#[proc_macro_attribute]
pub fn scene_component(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = if args.is_empty() {
        SceneComponentArgs { enums: Vec::new() }
    } else {
        parse_macro_input!(args as SceneComponentArgs)
    };

    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let generics = &input.generics;

    let struct_data = match &input.data {
        Data::Struct(s) => s,
        _ => {
            return syn::Error::new_spanned(name, "scene_component only works on structs")
                .to_compile_error()
                .into();
        }
    };

    let fields = &struct_data.fields;

    let struct_def = match fields {
        Fields::Named(_) => {
            quote! { #(#attrs)* #vis struct #name #generics #fields }
        }
        Fields::Unnamed(_) => {
            quote! { #(#attrs)* #vis struct #name #generics #fields; }
        }
        Fields::Unit => {
            quote! { #(#attrs)* #vis struct #name #generics; }
        }
    };

    // Field schemas: public literal-typed fields only. The `core` field
    // backs the base members and is never listed under its own name.
    let mut field_schemas = Vec::new();
    if let Fields::Named(named) = fields {
        for field in &named.named {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            if ident == "core" {
                continue;
            }
            if !matches!(field.vis, syn::Visibility::Public(_)) {
                continue;
            }
            if field.attrs.iter().any(|a| a.path().is_ident("deprecated")) {
                continue;
            }

            let fname = ident.to_string();
            let ty = &field.ty;
            let schema = match classify(ty, &args.enums) {
                TypeClass::Supported => quote! {
                    crate::scene::schema::FieldSchema {
                        name: #fname,
                        value: <#ty as crate::event::value::ValueTyped>::type_info(),
                        set: |any: &mut dyn std::any::Any,
                              value: &crate::event::value::Value|
                              -> Result<(), crate::event::error::InvokeError> {
                            let target = any
                                .downcast_mut::<#name>()
                                .ok_or(crate::event::error::InvokeError::TargetType)?;
                            target.#ident =
                                <#ty as crate::event::value::ValueTyped>::from_value(value)?;
                            Ok(())
                        },
                        default_value: || Some(
                            <#ty as crate::event::value::ValueTyped>::to_value(
                                &<#ty as ::std::default::Default>::default(),
                            ),
                        ),
                    }
                },
                TypeClass::ScriptEnum => quote! {
                    crate::scene::schema::FieldSchema {
                        name: #fname,
                        value: crate::event::value::ValueTypeInfo {
                            kind: crate::event::value::ValueKind::Enum,
                            type_path: std::any::type_name::<#ty>(),
                            enum_names: Some(
                                <#ty as crate::event::value::ScriptEnum>::names(),
                            ),
                        },
                        set: |any: &mut dyn std::any::Any,
                              value: &crate::event::value::Value|
                              -> Result<(), crate::event::error::InvokeError> {
                            let target = any
                                .downcast_mut::<#name>()
                                .ok_or(crate::event::error::InvokeError::TargetType)?;
                            match value {
                                crate::event::value::Value::Enum(i) => {
                                    target.#ident =
                                        <#ty as crate::event::value::ScriptEnum>::from_index(*i)
                                            .ok_or(
                                                crate::event::error::InvokeError::EnumIndexOutOfRange(*i),
                                            )?;
                                    Ok(())
                                }
                                other => Err(crate::event::error::InvokeError::SignatureMismatch {
                                    expected: crate::event::value::ValueKind::Enum,
                                    got: other.kind(),
                                }),
                            }
                        },
                        default_value: || Some(crate::event::value::Value::Enum(
                            crate::event::value::ScriptEnum::index(
                                &<#ty as ::std::default::Default>::default(),
                            ),
                        )),
                    }
                },
                TypeClass::Unsupported => quote! {
                    crate::scene::schema::FieldSchema {
                        name: #fname,
                        value: crate::event::value::ValueTypeInfo::unsupported(
                            std::any::type_name::<#ty>(),
                        ),
                        set: |_any: &mut dyn std::any::Any,
                              _value: &crate::event::value::Value|
                              -> Result<(), crate::event::error::InvokeError> {
                            Err(crate::event::error::InvokeError::Unsupported(
                                #fname.to_string(),
                            ))
                        },
                        default_value: || None,
                    }
                },
            };
            field_schemas.push(schema);
        }
    }

    let expanded = quote! {
        #struct_def

        impl #name #generics {
            pub const TYPE_NAME: &'static str = stringify!(#name);
        }

        impl #generics crate::scene::component::Component for #name #generics {
            fn type_name(&self) -> &'static str {
                Self::TYPE_NAME
            }
            fn core(&self) -> &crate::scene::component::ObjectCore {
                &self.core
            }
            fn core_mut(&mut self) -> &mut crate::scene::component::ObjectCore {
                &mut self.core
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        // Registry submission
        inventory::submit! {
            crate::scene::schema_registry::ComponentRegistry {
                type_name: <#name>::TYPE_NAME,
                spawn: || Box::new(<#name>::default())
                    as Box<dyn crate::scene::component::Component>,
                bases: || vec![
                    crate::scene::schema::behaviour_members::<#name>(),
                    crate::scene::schema::object_members::<#name>(),
                ],
            }
        }

        inventory::submit! {
            crate::scene::schema_registry::MemberSubmission {
                type_name: stringify!(#name),
                members: || crate::scene::schema::MemberSet {
                    fields: vec![#(#field_schemas),*],
                    properties: Vec::new(),
                    methods: Vec::new(),
                },
            }
        }
    };

    TokenStream::from(expanded)
}

/// `#[scene_methods]` – registers the eligible public methods of an
/// inherent impl block as invokable members. `set_*` methods with one
/// parameter become properties under the stripped name; anything with
/// an unsupported parameter type is dropped whole.
#[proc_macro_attribute]
pub fn scene_methods(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = if args.is_empty() {
        SceneComponentArgs { enums: Vec::new() }
    } else {
        parse_macro_input!(args as SceneComponentArgs)
    };

    let input = parse_macro_input!(input as syn::ItemImpl);

    let self_ident = match self_type_ident(&input) {
        Some(ident) => ident,
        None => {
            return syn::Error::new_spanned(
                &input.self_ty,
                "scene_methods requires a plain type name",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut properties = Vec::new();
    let mut methods = Vec::new();

    for item in &input.items {
        let syn::ImplItem::Fn(func) = item else {
            continue;
        };
        if !matches!(func.vis, syn::Visibility::Public(_)) {
            continue;
        }
        if func.attrs.iter().any(|a| a.path().is_ident("deprecated")) {
            continue;
        }
        if !func.sig.generics.params.is_empty() {
            continue;
        }
        // Only `&mut self` methods can mutate the live target.
        let Some(syn::FnArg::Receiver(receiver)) = func.sig.inputs.first() else {
            continue;
        };
        if receiver.reference.is_none() || receiver.mutability.is_none() {
            continue;
        }

        let mut params = Vec::new();
        let mut eligible = true;
        for arg in func.sig.inputs.iter().skip(1) {
            let syn::FnArg::Typed(typed) = arg else {
                eligible = false;
                break;
            };
            let syn::Pat::Ident(pat) = typed.pat.as_ref() else {
                eligible = false;
                break;
            };
            let class = classify(&typed.ty, &args.enums);
            if matches!(class, TypeClass::Unsupported) {
                eligible = false;
                break;
            }
            params.push((pat.ident.to_string(), (*typed.ty).clone(), class));
        }
        if !eligible {
            continue;
        }

        let fn_ident = &func.sig.ident;
        let fn_name = fn_ident.to_string();

        if let Some(prop_name) = fn_name.strip_prefix("set_") {
            if params.len() == 1 {
                let (_, ty, class) = &params[0];
                let value_info = value_info_tokens(ty, class);
                let convert = convert_tokens(ty, class, quote! { value });
                let default = default_tokens(ty, class);
                properties.push(quote! {
                    crate::scene::schema::PropertySchema {
                        name: #prop_name,
                        value: #value_info,
                        set: |any: &mut dyn std::any::Any,
                              value: &crate::event::value::Value|
                              -> Result<(), crate::event::error::InvokeError> {
                            let target = any
                                .downcast_mut::<#self_ident>()
                                .ok_or(crate::event::error::InvokeError::TargetType)?;
                            target.#fn_ident(#convert);
                            Ok(())
                        },
                        default_value: #default,
                    }
                });
                continue;
            }
        }

        let arity = params.len();
        let param_schemas: Vec<_> = params
            .iter()
            .map(|(pname, ty, class)| {
                let value_info = value_info_tokens(ty, class);
                let default = default_tokens(ty, class);
                quote! {
                    crate::scene::schema::ParamSchema {
                        name: #pname,
                        value: #value_info,
                        default_value: #default,
                    }
                }
            })
            .collect();
        let arg_exprs: Vec<_> = params
            .iter()
            .enumerate()
            .map(|(i, (_, ty, class))| convert_tokens(ty, class, quote! { &args[#i] }))
            .collect();

        methods.push(quote! {
            crate::scene::schema::MethodSchema {
                name: #fn_name,
                params: vec![#(#param_schemas),*],
                invoke: |any: &mut dyn std::any::Any,
                         args: &[crate::event::value::Value]|
                         -> Result<(), crate::event::error::InvokeError> {
                    let target = any
                        .downcast_mut::<#self_ident>()
                        .ok_or(crate::event::error::InvokeError::TargetType)?;
                    if args.len() != #arity {
                        return Err(crate::event::error::InvokeError::ArityMismatch {
                            expected: #arity,
                            got: args.len(),
                        });
                    }
                    let _ = target.#fn_ident(#(#arg_exprs),*);
                    Ok(())
                },
            }
        });
    }

    let expanded = quote! {
        #input

        inventory::submit! {
            crate::scene::schema_registry::MemberSubmission {
                type_name: stringify!(#self_ident),
                members: || crate::scene::schema::MemberSet {
                    fields: Vec::new(),
                    properties: vec![#(#properties),*],
                    methods: vec![#(#methods),*],
                },
            }
        }
    };

    TokenStream::from(expanded)
}

fn self_type_ident(input: &syn::ItemImpl) -> Option<syn::Ident> {
    match input.self_ty.as_ref() {
        Type::Path(p) => p.path.get_ident().cloned(),
        _ => None,
    }
}

fn classify(ty: &Type, enums: &[Type]) -> TypeClass {
    let ty_text = quote!(#ty).to_string();
    if enums.iter().any(|e| quote!(#e).to_string() == ty_text) {
        return TypeClass::ScriptEnum;
    }
    if is_supported_path(ty) {
        TypeClass::Supported
    } else {
        TypeClass::Unsupported
    }
}

/// Type eligibility is syntactic, by the path's last segment. A bare
/// segment with generic arguments (`Vec<Rect>`) never matches.
fn is_supported_path(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if !segment.arguments.is_empty() {
        return false;
    }
    matches!(
        segment.ident.to_string().as_str(),
        "bool"
            | "char"
            | "i8"
            | "u8"
            | "i16"
            | "u16"
            | "i32"
            | "u32"
            | "i64"
            | "u64"
            | "f32"
            | "f64"
            | "String"
            | "Vec2"
            | "Vec3"
            | "Vec4"
            | "Quat"
            | "Color"
            | "Rect"
            | "Bounds"
            | "Mat4"
            | "AnimationCurve"
            | "NodeId"
    )
}

fn value_info_tokens(ty: &Type, class: &TypeClass) -> proc_macro2::TokenStream {
    match class {
        TypeClass::ScriptEnum => quote! {
            crate::event::value::ValueTypeInfo {
                kind: crate::event::value::ValueKind::Enum,
                type_path: std::any::type_name::<#ty>(),
                enum_names: Some(<#ty as crate::event::value::ScriptEnum>::names()),
            }
        },
        _ => quote! {
            <#ty as crate::event::value::ValueTyped>::type_info()
        },
    }
}

fn convert_tokens(
    ty: &Type,
    class: &TypeClass,
    value: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    match class {
        TypeClass::ScriptEnum => quote! {
            match #value {
                crate::event::value::Value::Enum(i) => {
                    <#ty as crate::event::value::ScriptEnum>::from_index(*i)
                        .ok_or(crate::event::error::InvokeError::EnumIndexOutOfRange(*i))?
                }
                other => {
                    return Err(crate::event::error::InvokeError::SignatureMismatch {
                        expected: crate::event::value::ValueKind::Enum,
                        got: other.kind(),
                    })
                }
            }
        },
        _ => quote! {
            <#ty as crate::event::value::ValueTyped>::from_value(#value)?
        },
    }
}

fn default_tokens(ty: &Type, class: &TypeClass) -> proc_macro2::TokenStream {
    match class {
        TypeClass::ScriptEnum => quote! {
            || Some(crate::event::value::Value::Enum(
                crate::event::value::ScriptEnum::index(
                    &<#ty as ::std::default::Default>::default(),
                ),
            ))
        },
        _ => quote! {
            || Some(<#ty as crate::event::value::ValueTyped>::to_value(
                &<#ty as ::std::default::Default>::default(),
            ))
        },
    }
}
