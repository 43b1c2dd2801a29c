//! Analytics Panel
//!
//! Summary cards, monthly volume, sent/received split and insights for one
//! [`AnalyticsReport`].

use leptos::*;
use payclone::analytics::MonthBucket;
use payclone::format::{currency, percent, signed_currency};
use payclone::AnalyticsReport;

use super::stat_card::Tone;
use super::{ActivityChart, StatCard};

#[component]
pub fn AnalyticsPanel(report: AnalyticsReport) -> impl IntoView {
    let s = report.summary.clone();
    let i = report.insights.clone();
    let daily = report.daily.clone();
    let month_max = monthly_max(&report.monthly);

    view! {
        <div class="space-y-8">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <StatCard label="Total sent" value=currency(s.total_sent) hint=format!("{} transfers", s.sent_count) />
                <StatCard label="Total received" value=currency(s.total_received) hint=format!("{} transfers", s.received_count) />
                <StatCard label="Net flow" value=signed_currency(s.net_flow) tone=Tone::for_amount(s.net_flow) />
                <StatCard
                    label="Success rate"
                    value=percent(s.success_rate)
                    hint=format!("Trend {}", percent(s.trend_percent))
                />
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Daily activity"</h2>
                <ActivityChart buckets=Signal::derive(move || daily.clone()) />
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Monthly volume"</h2>
                    {if report.monthly.is_empty() {
                        view! { <p class="text-gray-400 text-sm">"No completed transactions yet"</p> }.into_view()
                    } else {
                        report.monthly.iter().map(|m| view! {
                            <div class="mb-3">
                                <div class="flex justify-between text-sm text-gray-300">
                                    <span>{m.label.clone()}</span>
                                    <span>{format!("{} / {}", currency(m.sent), currency(m.received))}</span>
                                </div>
                                <div class="flex gap-1 mt-1">
                                    <div class="h-2 bg-red-500 rounded" style=format!("width: {}%", share(m.sent, month_max)) />
                                    <div class="h-2 bg-green-500 rounded" style=format!("width: {}%", share(m.received, month_max)) />
                                </div>
                            </div>
                        }).collect_view()
                    }}
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Where money goes"</h2>
                    {report.distribution.iter().map(|slice| view! {
                        <div class="flex justify-between py-2 border-b border-gray-700 last:border-0">
                            <span>{slice.label}</span>
                            <span class="text-gray-300">
                                {format!("{} ({})", currency(slice.value), percent(slice.fraction * 100.0))}
                            </span>
                        </div>
                    }).collect_view()}

                    <h3 class="text-lg font-semibold mt-6 mb-2">"Insights"</h3>
                    <ul class="space-y-1 text-sm text-gray-300">
                        <li>{format!("Largest transaction: {}", currency(i.largest))}</li>
                        <li>{format!("Most active day: {}", i.weekday_label())}</li>
                        <li>{format!("Peak hour: {}", i.peak_hour_label())}</li>
                        <li>{format!("Average per week: {}", currency(i.average_per_week))}</li>
                        <li>{format!("Active days: {} ({})", i.active_days, i.frequency_label)}</li>
                    </ul>
                </section>
            </div>
        </div>
    }
}

fn monthly_max(months: &[MonthBucket]) -> f64 {
    months
        .iter()
        .map(|m| m.sent.max(m.received))
        .fold(0.0_f64, f64::max)
}

/// Bar width in percent of the largest month
fn share(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share() {
        assert_eq!(share(25.0, 100.0), 25.0);
        assert_eq!(share(5.0, 0.0), 0.0);
        assert_eq!(share(200.0, 100.0), 100.0);
    }
}
