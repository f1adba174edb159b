//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Attribute macro implementing `SolutionRunner` for a struct or impl block.
///
/// The generated `run` routes to the `aoc_framework::runner` function matching the given
/// properties.
///
/// # Properties
///
/// - `name` (required): an expression evaluating to `&str`, the solution's display name.
/// - `part_one` (required): the type implementing `Solution<PartOne>`.
/// - `part_two` (optional): the type implementing `Solution<PartTwo>`. Without it only part one
///   runs.
/// - `parsed` (optional): a type implementing `ParseData` that input is parsed into before solving.
///   Without it, solvers receive the input string.
///
/// # Errors
///
/// A compile error is produced when applied to anything but a struct or impl block, when a
/// required property is missing, or for a duplicate or unknown property.
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// struct Day01Runner;
///
/// const NAME: &str = "Day 2";
/// #[solution_runner(name = NAME, parsed = BoxIds, part_one = Checksum, part_two = CommonLetters)]
/// impl Solutions<2> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let property_parser = syn::meta::parser(|meta| properties.parse_property(&meta));
    parse_macro_input!(args with property_parser);

    let solve_call = match properties.solve_call() {
        Ok(call) => call,
        Err(error) => return error.to_compile_error().into(),
    };

    let original_input = proc_macro2::TokenStream::from(input.clone());
    let item = parse_macro_input!(input as Item);

    let self_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original_input

        impl aoc_framework::runner::SolutionRunner for #self_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #solve_call
            }
        }
    })
}

/// The properties given to `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    name: Option<Expr>,
    parsed: Option<Type>,
    part_one: Option<Type>,
    part_two: Option<Type>,
}

/// Parse a property value into an empty slot, rejecting a repeated key.
fn fill_once<T: Parse>(slot: &mut Option<T>, key: &str, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{key}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Take a required property, or produce a compile error naming it.
fn required<T>(slot: Option<T>, key: &str) -> syn::Result<T> {
    slot.ok_or_else(|| {
        Error::new(
            Span::call_site(),
            format!("missing required property: '{key}'"),
        )
    })
}

impl RunnerProperties {
    fn parse_property(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            fill_once(&mut self.name, "name", meta)
        } else if meta.path.is_ident("parsed") {
            fill_once(&mut self.parsed, "parsed", meta)
        } else if meta.path.is_ident("part_one") {
            fill_once(&mut self.part_one, "part_one", meta)
        } else if meta.path.is_ident("part_two") {
            fill_once(&mut self.part_two, "part_two", meta)
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }

    /// Build the call to the runner function matching the given properties.
    fn solve_call(self) -> syn::Result<proc_macro2::TokenStream> {
        let name = required(self.name, "name")?;
        let part_one = required(self.part_one, "part_one")?;

        let call = match (self.parsed, self.part_two) {
            (None, None) => quote! {
                aoc_framework::runner::solve_half_solution::<#part_one>
            },
            (None, Some(part_two)) => quote! {
                aoc_framework::runner::solve_full_solution::<#part_one, #part_two>
            },
            (Some(parsed), None) => quote! {
                aoc_framework::runner::solve_parsed_half_solution::<#parsed, #part_one>
            },
            (Some(parsed), Some(part_two)) => quote! {
                aoc_framework::runner::solve_parsed_full_solution::<#parsed, #part_one, #part_two>
            },
        };

        Ok(quote! {
            #call(#name, input, handler, timed)
        })
    }
}
