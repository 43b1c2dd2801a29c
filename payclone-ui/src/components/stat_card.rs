//! Stat Card Component
//!
//! One headline number with an optional sub-label.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl Tone {
    /// Positive for gains, negative for losses
    pub fn for_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Tone::Positive
        } else if amount < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "text-white",
            Tone::Positive => "text-green-400",
            Tone::Negative => "text-red-400",
        }
    }
}

#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)]
    value: String,
    #[prop(optional, into)]
    hint: Option<String>,
    #[prop(optional)]
    tone: Tone,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <div class="text-sm text-gray-400">{label}</div>
            <div class=format!("text-2xl font-bold mt-1 {}", tone.class())>{value}</div>
            {hint.map(|h| view! { <div class="text-xs text-gray-500 mt-1">{h}</div> })}
        </div>
    }
}
