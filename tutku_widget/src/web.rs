//! Helpers for interacting with the browser environment.

use wasm_bindgen::JsCast;

use crate::BootError;

/// Defines an enum whose variants map to a DOM attribute name and the
/// property name handed to a component.
///
/// The attribute name is what the host page writes on the loader tag, the
/// property name is what the mounted component receives.
#[macro_export]
macro_rules! make_attr_enum {
    (
        $( #[$meta:meta] )*
        $enum_name:ident {
            $( $name:ident = ($attr:literal, $prop:literal), )*
        }
    ) => {
        $( #[$meta] )*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $enum_name {
            $( $name, )*
        }

        impl $enum_name {
            /// All variants, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// The DOM attribute holding the value.
            pub fn attr_name(self) -> &'static str {
                match self {
                    $(
                        Self::$name => $attr,
                    )*
                }
            }

            /// The component property name.
            pub fn prop_name(self) -> &'static str {
                match self {
                    $(
                        Self::$name => $prop,
                    )*
                }
            }

            /// Look up a variant by its DOM attribute name.
            pub fn from_attr_name(name: &str) -> Option<Self> {
                match name {
                    $(
                        $attr => Some(Self::$name),
                    )*
                    _ => None,
                }
            }
        }
    };
}

pub fn window() -> Result<web_sys::Window, BootError> {
    web_sys::window().ok_or(BootError::NoWindow)
}

pub fn document() -> Result<web_sys::Document, BootError> {
    window()?.document().ok_or(BootError::NoDocument)
}

pub fn body(doc: &web_sys::Document) -> Result<web_sys::HtmlElement, BootError> {
    doc.body().ok_or(BootError::NoBody)
}

/// The script element whose code is currently being evaluated.
///
/// Equivalent to Javascript: `document.currentScript`.
/// Only set during synchronous evaluation of a classic script; `None` inside
/// event callbacks, module scripts and async continuations.
pub fn current_script(doc: &web_sys::Document) -> Option<web_sys::HtmlScriptElement> {
    doc.current_script()?.dyn_into().ok()
}

/// All script elements of the document, in document order.
pub fn script_elements(doc: &web_sys::Document) -> Vec<web_sys::HtmlScriptElement> {
    let collection = doc.get_elements_by_tag_name("script");
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .filter_map(|elem| elem.dyn_into::<web_sys::HtmlScriptElement>().ok())
        .collect()
}
