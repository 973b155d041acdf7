//! Report message view with its action controls.

use leptos::prelude::*;

use crate::session::ReportEntry;
use crate::ui::components::{
    Button, ButtonVariant, ChartIcon, CheckCircleIcon, DatabaseIcon, DownloadIcon, EyeIcon,
    LightbulbIcon, LoaderIcon,
};

use super::message::{MessageText, MessageTime};
use super::routes::{ReportAction, report_action_url, validation_slot_id};
use super::validation::ValidationView;

/// Element id of a rendered report.
#[must_use]
pub fn report_element_id(report_id: &str) -> String {
    format!("report-{report_id}")
}

/// Report reply: summary, analysis, recommendations, the three action
/// buttons and the slot holding the current validation.
#[component]
pub fn ReportView(
    /// Session the report belongs to.
    session_id: String,
    /// The report and its attached validation.
    entry: ReportEntry,
    /// Render the validate button disabled, for a page reload while a
    /// validation is in flight.
    #[prop(default = false)]
    validating: bool,
) -> impl IntoView {
    let ReportEntry {
        id,
        message,
        report,
        validation,
    } = entry;
    let summary = report.summary;

    let score = summary.score().map(|score| {
        let value = format!("{score}/100");
        view! {
            <div class="score-badge">
                <span class="score-label">"Sustainability Score:"</span>
                <span class="score-value">{value}</span>
            </div>
        }
    });

    let data_points = summary.data_points().map(|points| {
        let label = format!("{points} data points analyzed");
        view! { <div class="data-points"><DatabaseIcon class="me-1" />{label}</div> }
    });

    let recommendations = summary.key_recommendations;
    let recommendations = (!recommendations.is_empty()).then(move || {
        view! {
            <div class="recommendations">
                <strong><LightbulbIcon class="me-1" />"Key Recommendations:"</strong>
                <ul>
                    {recommendations
                        .into_iter()
                        .map(|rec| view! { <li>{rec}</li> })
                        .collect_view()}
                </ul>
            </div>
        }
    });

    let download_url = report_action_url(&session_id, &id, ReportAction::Download);
    let details_url = report_action_url(&session_id, &id, ReportAction::Details);
    let validate_url = report_action_url(&session_id, &id, ReportAction::Validate);
    let slot_id = validation_slot_id(&id);
    // The slot is replaced wholesale, so at most one result is ever shown.
    let slot_target = format!("#{slot_id}");
    let element_id = report_element_id(&id);
    let time = message.display_time();
    let analysis = message.text;
    let validation = validation.map(|result| view! { <ValidationView result=result /> });

    view! {
        <div class="message bot-message report-message" id=element_id>
            <div class="message-content report-content">
                <div class="report-header">
                    <ChartIcon class="me-2" />
                    <strong>"Sustainability Report Generated"</strong>
                </div>
                <div class="report-summary">{score}{data_points}</div>
                <div class="report-analysis"><MessageText text=analysis /></div>
                {recommendations}
                <div class="report-actions">
                    <Button
                        variant=ButtonVariant::OutlineSuccess
                        class="download-btn"
                        hx_post=download_url
                        hx_target="#chat-messages"
                        hx_swap="beforeend"
                    >
                        <DownloadIcon class="me-1" />
                        "Download Report"
                    </Button>
                    <Button
                        variant=ButtonVariant::OutlineInfo
                        class="details-btn"
                        hx_post=details_url
                        hx_target="#chat-messages"
                        hx_swap="beforeend"
                    >
                        <EyeIcon class="me-1" />
                        "View Details"
                    </Button>
                    <Button
                        variant=ButtonVariant::OutlineWarning
                        class="validate-btn"
                        disabled=validating
                        hx_post=validate_url
                        hx_target=slot_target
                        hx_swap="innerHTML"
                        busy_while_requesting=true
                    >
                        <span class="btn-label-idle">
                            <CheckCircleIcon class="me-1" />
                            "Validate Facts"
                        </span>
                        <span class="btn-label-busy">
                            <LoaderIcon class="me-1" />
                            "Validating..."
                        </span>
                    </Button>
                </div>
                <div class="validation-slot" id=slot_id aria-live="polite">
                    {validation}
                </div>
            </div>
            <MessageTime time=time />
        </div>
    }
}
