mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields or no fields.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use cas_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "division by zero", labels = ["this denominator is zero"])]
/// pub struct Foo;
///
/// # use cas_error::ErrorKind as _;
/// assert_eq!(Foo.message(), "division by zero");
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An iterable of label texts, one for each span of the error, in order.        |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// `message` and `help` accept an expression that evaluates to something implementing
/// [`ToString`]. For structs with named fields, the expressions are evaluated with the members
/// of the struct in scope, so they can be used in the expression (tuple structs are not
/// supported).
///
/// Labels beyond the number of spans attached to the error are ignored, so an error created
/// without spans renders as its message and help text alone.
///
/// [`ErrorKind`]: ../cas_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl cas_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
