use brochure_core::content::types::TrainingProgram;
use maud::{html, Markup};

use super::layout;

pub fn training(site_name: &str, programs: &[TrainingProgram]) -> Markup {
    layout::page(
        site_name,
        "Training",
        html! {
            h1 { "Training programs" }
            @for program in programs {
                article.program {
                    h2 { (program.title) }
                    @if let Some(summary) = &program.summary { p { (summary) } }
                    dl {
                        @if let Some(duration) = &program.duration { dt { "Duration" } dd { (duration) } }
                        @if let Some(format) = &program.delivery_format { dt { "Format" } dd { (format) } }
                    }
                }
            }
            a.cta href="/#contact" { "Ask about training" }
        },
    )
}
