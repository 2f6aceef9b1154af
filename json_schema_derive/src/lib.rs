use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit};

#[proc_macro_derive(ToJsonSchema, attributes(schema))]
pub fn derive_to_json_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let mut schema_title = None;
    let mut schema_description = None;

    for attr in &input.attrs {
        if attr.path().is_ident("schema") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("title") {
                    let value = meta.value()?;
                    let lit = value.parse::<syn::LitStr>()?;
                    schema_title = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("description") {
                    let value = meta.value()?;
                    let lit = value.parse::<syn::LitStr>()?;
                    schema_description = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported schema attribute at struct level, expected 'title' or 'description'"))
                }
            }).unwrap_or_else(|e| panic!("Failed to parse struct-level schema attribute: {e}"));
        }
    }

    let schema_title = schema_title.unwrap_or_else(|| name.to_string());
    let schema_description = schema_description.unwrap_or_else(|| format!("Schema for {name}"));

    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => panic!("ToJsonSchema only supports named fields"),
        },
        _ => panic!("ToJsonSchema only supports structs"),
    };

    let mut properties = Vec::new();
    let mut required = Vec::new();

    for field in fields {
        let field_name = field.ident.as_ref().unwrap().to_string();
        let field_type = &field.ty;

        let json_type = match field_type {
            syn::Type::Path(type_path) if type_path.path.is_ident("String") => "string",
            syn::Type::Path(type_path) if type_path.path.is_ident("bool") => "boolean",
            syn::Type::Path(type_path) if type_path.path.is_ident("i32") => "integer",
            syn::Type::Path(type_path) if type_path.path.is_ident("i64") => "integer",
            syn::Type::Path(type_path) if type_path.path.is_ident("u32") => "integer",
            syn::Type::Path(type_path) if type_path.path.is_ident("f32") => "number",
            syn::Type::Path(type_path) if type_path.path.is_ident("f64") => "number",
            _ => panic!(
                "Unsupported field type '{}' for field '{}'",
                quote!(#field_type),
                field_name
            ),
        };

        let mut title = None;
        let mut description = None;
        let mut exclusive_minimum: Option<Lit> = None;
        let mut optional = false;

        for attr in &field.attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("title") {
                        let value = meta.value()?;
                        let lit = value.parse::<syn::LitStr>()?;
                        title = Some(lit.value());
                        Ok(())
                    } else if meta.path.is_ident("description") {
                        let value = meta.value()?;
                        let lit = value.parse::<syn::LitStr>()?;
                        description = Some(lit.value());
                        Ok(())
                    } else if meta.path.is_ident("exclusive_minimum") {
                        let value = meta.value()?;
                        let lit = value.parse::<Lit>()?;
                        match lit {
                            Lit::Int(_) | Lit::Float(_) => {
                                exclusive_minimum = Some(lit);
                                Ok(())
                            }
                            _ => Err(meta.error("'exclusive_minimum' expects a numeric literal")),
                        }
                    } else if meta.path.is_ident("optional") {
                        if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
                            optional = true;
                            Ok(())
                        } else {
                            Err(meta.error("'optional' attribute takes no value"))
                        }
                    } else {
                        Err(meta.error(
                            "unsupported schema attribute, expected 'title', 'description', 'exclusive_minimum' or 'optional'",
                        ))
                    }
                })
                .unwrap_or_else(|e| {
                    panic!("Failed to parse field schema attribute for '{field_name}': {e}",)
                });
            }
        }

        let title = title.unwrap_or_else(|| field_name.clone());
        let description = description.unwrap_or_else(|| format!("No description for {field_name}"));
        let minimum = exclusive_minimum.iter();

        properties.push(quote! {
            properties[#field_name] = {
                #[allow(unused_mut)]
                let mut property = json_schema::json!({
                    "type": #json_type,
                    "title": #title,
                    "description": #description
                });
                #( property["exclusiveMinimum"] = json_schema::json!(#minimum); )*
                property
            };
        });

        if !optional {
            required.push(field_name);
        }
    }

    let expanded = quote! {
        impl json_schema::ToJsonSchema for #name {
            fn to_json_schema() -> json_schema::Value {
                let mut properties = json_schema::json!({});
                #(#properties)*
                json_schema::json!({
                    "$schema": "https://json-schema.org/draft/2020-12/schema",
                    "title": #schema_title,
                    "description": #schema_description,
                    "type": "object",
                    "properties": properties,
                    "required": [#(#required),*]
                })
            }
        }
    };

    TokenStream::from(expanded)
}
