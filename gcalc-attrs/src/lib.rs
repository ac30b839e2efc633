mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `gcalc_error::ErrorKind` trait for the given struct.
///
/// The information of the error is customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use gcalc_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     category = Domain,
///     message = format!("No value provided for {}.", name),
///     labels = ["this variable"],
///     help = "bind a value to the variable before evaluating",
/// )]
/// pub struct UnboundVariable {
///     pub name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `category`  | One of `Syntax`, `Domain`, `Nonreal` or `Function`. Required.                |
/// | `message`   | The message displayed at the top of the error when it is displayed. Required.|
/// | `labels`    | Texts of the labels pointing to each span of the error, in order.            |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// `message`, `labels` and `help` accept expressions. For structs with named fields, the
/// expression is evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl gcalc_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}
