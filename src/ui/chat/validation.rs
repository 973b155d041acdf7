//! Fact validation results block.

use leptos::prelude::*;

use crate::backend::{AccuracyTier, ValidationResult};
use crate::ui::components::{
    AlertCircleIcon, AlertTriangleIcon, Badge, BadgeVariant, CheckCircleIcon, CheckIcon,
    ClipboardCheckIcon, XCircleIcon, XIcon,
};

/// Text color class for an accuracy tier.
#[must_use]
pub fn tier_class(tier: AccuracyTier) -> &'static str {
    match tier {
        AccuracyTier::Success => "text-success",
        AccuracyTier::Warning => "text-warning",
        AccuracyTier::Danger => "text-danger",
    }
}

/// Validation block shown inside a report.
///
/// Empty lists render no section at all.
#[component]
pub fn ValidationView(
    /// The result to display.
    result: ValidationResult,
) -> impl IntoView {
    let tier = tier_class(result.tier());
    let accuracy = result.accuracy_label();
    let facts_checked = format!("Facts Checked: {}", result.total_facts);
    let ValidationResult {
        verified_facts,
        discrepancies,
        errors,
        ..
    } = result;

    let verified = (!verified_facts.is_empty()).then(move || {
        view! {
            <div class="verified-facts mb-2">
                <strong class="text-success"><CheckIcon class="me-1" />"Verified Facts:"</strong>
                <ul class="list-unstyled ms-3">
                    {verified_facts
                        .into_iter()
                        .map(|fact| view! {
                            <li class="text-success"><CheckCircleIcon class="me-1" />{fact}</li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
    });

    let discrepancies = (!discrepancies.is_empty()).then(move || {
        view! {
            <div class="discrepancies mb-2">
                <strong class="text-warning"><AlertTriangleIcon class="me-1" />"Potential Issues:"</strong>
                <ul class="list-unstyled ms-3">
                    {discrepancies
                        .into_iter()
                        .map(|d| {
                            let line = format!(
                                "{} (Reported: {}, Actual: {})",
                                d.issue,
                                d.reported(),
                                d.actual()
                            );
                            view! {
                                <li class="text-warning"><AlertCircleIcon class="me-1" />{line}</li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        }
    });

    let errors = (!errors.is_empty()).then(move || {
        view! {
            <div class="errors">
                <strong class="text-danger"><XIcon class="me-1" />"Validation Errors:"</strong>
                <ul class="list-unstyled ms-3">
                    {errors
                        .into_iter()
                        .map(|error| view! {
                            <li class="text-danger"><XCircleIcon class="me-1" />{error}</li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
    });

    view! {
        <div class="validation-results mt-3 p-3 border rounded">
            <h6><ClipboardCheckIcon class="me-2" />"Fact Validation Results"</h6>
            <div class="validation-summary mb-3">
                <Badge variant=BadgeVariant::Primary class="me-2">
                    "Overall Accuracy: "
                    <span class=tier>{accuracy}</span>
                </Badge>
                <Badge variant=BadgeVariant::Info>{facts_checked}</Badge>
            </div>
            {verified}
            {discrepancies}
            {errors}
        </div>
    }
}
