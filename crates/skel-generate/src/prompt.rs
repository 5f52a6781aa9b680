//! Messages sent to the chat-completions service.

use crate::framework::Framework;

/// System message describing the skeleton conventions the service must follow.
pub const INSTRUCTION_PROFILE: &str = r#"You generate skeleton loaders: markup that stands in for a UI component while its data loads.

Convert the component you receive into a skeleton with the same layout.

Rules:
1. Use Tailwind CSS utility classes only. No inline styles, no custom CSS.
2. Every placeholder box uses bg-gray-300 and no other background color.
3. The root element carries animate-pulse, role="status" and aria-busy="true".
4. Output contains no text content at all.
5. Drop functional attributes such as src, alt, href, onClick and value.
6. Keep the component hierarchy and nesting, and keep its layout classes
   (flex, grid, gap, padding, margin, widths and responsive variants).
7. Text becomes one or more boxes sized to the text, rounded-md; the last line
   of a multi-line block is the shortest.
8. Images and icons become boxes of the same size; circular avatars use
   rounded-full.
9. Buttons and form fields keep their size and shape (rounded-md unless the
   original is rounded-full).
10. Tables, lists and navigation bars become a handful of uniform rows or
    items (three to five).

Default sizes when the component does not specify one:
- div: w-full
- p, span: w-full h-4
- h1: w-3/4 h-8
- h2: w-2/3 h-6
- h3: w-1/2 h-5
- h4, h5, h6: w-40 h-4
- img: w-full h-48
- button: w-24 h-10
- input, select, textarea: w-full h-10
- avatar or icon: w-10 h-10
- table cell: w-full h-8
- list item: w-full h-6

Reply with plain HTML using class attributes, no JSX and no explanation:

<div class="flex flex-col space-y-4 animate-pulse" role="status" aria-busy="true">
  <div class="w-3/4 h-8 bg-gray-300 rounded-md"></div>
  <div class="w-full h-4 bg-gray-300 rounded-md"></div>
  <div class="w-full h-48 bg-gray-300 rounded-md"></div>
</div>"#;

/// User message carrying the component.
#[must_use]
pub fn user_message(framework: Framework, component: &str) -> String {
    format!(
        "Convert this {framework} component structure into a skeleton loader. \
         Analyze carefully and preserve all layout and responsive behavior:\n\n{component}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_names_framework() {
        let message = user_message(Framework::Vue, "<template><p/></template>");

        assert!(message.starts_with("Convert this Vue component structure"));
        assert!(message.ends_with("\n\n<template><p/></template>"));
    }

    #[test]
    fn test_profile_mentions_required_markers() {
        for marker in ["bg-gray-300", "animate-pulse", r#"role="status""#, r#"aria-busy="true""#] {
            assert!(INSTRUCTION_PROFILE.contains(marker), "{marker}");
        }
    }
}
