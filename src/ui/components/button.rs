//! Button component with variants and sizes.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Positive secondary action (download).
    OutlineSuccess,
    /// Informational secondary action (details).
    OutlineInfo,
    /// Cautionary secondary action (validate).
    OutlineWarning,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary bg-primary text-white hover:bg-primaryMuted",
            Self::OutlineSuccess => "btn-outline-success border border-success text-success hover:bg-success hover:text-white",
            Self::OutlineInfo => "btn-outline-info border border-info text-info hover:bg-info hover:text-white",
            Self::OutlineWarning => "btn-outline-warning border border-warning text-warning hover:bg-warning hover:text-black",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button (default).
    #[default]
    Sm,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "btn-sm h-8 px-3 text-xs",
            Self::Icon => "h-10 w-10",
        }
    }
}

/// Button component with variant styling and optional HTMX bindings.
///
/// # Example
///
/// ```rust
/// use leptos::prelude::*;
/// use sustain_chat::ui::components::{Button, ButtonVariant};
/// use sustain_chat::ui::render;
///
/// let html = render(|| view! {
///     <Button variant=ButtonVariant::OutlineInfo hx_post="/ui/sessions/s1/reports/r1/details">
///         "View Details"
///     </Button>
/// });
/// assert!(html.contains("btn-outline-info"));
/// assert!(html.contains(r#"hx-post="/ui/sessions/s1/reports/r1/details""#));
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Sm)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Element id.
    #[prop(optional)]
    id: Option<&'static str>,
    /// Accessible label, for icon-only buttons.
    #[prop(optional)]
    label: Option<&'static str>,
    /// URL posted to on click.
    #[prop(optional, into)]
    hx_post: Option<String>,
    /// Selector of the element receiving the response.
    #[prop(optional, into)]
    hx_target: Option<String>,
    /// HTMX swap strategy.
    #[prop(optional)]
    hx_swap: Option<&'static str>,
    /// Disable the button and mark it busy while its own request runs.
    #[prop(default = false)]
    busy_while_requesting: bool,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let base_classes = "btn inline-flex items-center justify-center gap-1 rounded-lg font-medium \
                        transition-colors focus-visible:outline-none focus-visible:ring-2 \
                        focus-visible:ring-primary disabled:pointer-events-none disabled:opacity-50";

    let classes = format!(
        "{} {} {} {}",
        base_classes,
        variant.classes(),
        size.classes(),
        class
    );
    let busy_target = busy_while_requesting.then_some("this");

    view! {
        <button
            type=button_type
            class=classes
            id=id
            aria-label=label
            disabled=disabled
            hx-post=hx_post
            hx-target=hx_target
            hx-swap=hx_swap
            hx-disabled-elt=busy_target
            hx-indicator=busy_target
        >
            {children()}
        </button>
    }
}
