//! Transaction Table Component

use chrono::Utc;
use leptos::*;
use payclone::format::{relative_time, signed_currency};
use payclone::model::Direction;
use payclone::{Id, Transaction};

#[component]
pub fn TransactionTable(
    viewer: Id,
    rows: Vec<Transaction>,
    #[prop(optional)]
    empty_text: Option<&'static str>,
) -> impl IntoView {
    if rows.is_empty() {
        return view! {
            <p class="text-gray-400 text-sm py-4">{empty_text.unwrap_or("No transactions")}</p>
        }
        .into_view();
    }

    let now = Utc::now();
    view! {
        <table class="w-full text-sm">
            <thead>
                <tr class="text-left text-gray-400 border-b border-gray-700">
                    <th class="py-2">"Date"</th>
                    <th class="py-2">"Type"</th>
                    <th class="py-2">"Description"</th>
                    <th class="py-2">"Status"</th>
                    <th class="py-2 text-right">"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|t| {
                    let (amount, amount_class) = display_amount(&t, viewer);
                    view! {
                        <tr class="border-b border-gray-700 last:border-0">
                            <td class="py-2 text-gray-400" title=t.timestamp.to_rfc3339()>
                                {relative_time(t.timestamp, now)}
                            </td>
                            <td class="py-2">{t.label_for(viewer)}</td>
                            <td class="py-2">{t.description.clone().unwrap_or_else(|| "-".to_string())}</td>
                            <td class="py-2">
                                <span class=status_class(&t)>{t.status.keyword().to_string()}</span>
                            </td>
                            <td class=format!("py-2 text-right font-semibold {}", amount_class)>{amount}</td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

/// Signed amount from the viewer's side, with its colour
fn display_amount(t: &Transaction, viewer: Id) -> (String, &'static str) {
    match t.direction_for(viewer) {
        Some(Direction::Debit) => (signed_currency(-t.amount), "text-red-400"),
        _ => (signed_currency(t.amount), "text-green-400"),
    }
}

fn status_class(t: &Transaction) -> &'static str {
    if t.is_completed() {
        "text-green-400"
    } else if t.status.is_failed() {
        "text-red-400"
    } else {
        "text-yellow-400"
    }
}
