use jiff::civil::Date;
use payloads::{
    Payment, PaymentFilter, requests, requests::DEFAULT_PAGE_SIZE, responses,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{LoadMoreControls, RequireAuth};
use crate::get_api_client;
use crate::hooks::{use_fetch, use_paginated_fetch};

#[function_component]
pub fn IncomePage() -> Html {
    html! {
        <RequireAuth>
            <IncomeSummary />
        </RequireAuth>
    }
}

#[function_component]
fn IncomeSummary() -> Html {
    let date = use_state(|| jiff::Zoned::now().date());

    let daily = use_fetch(*date, |date| async move {
        get_api_client()
            .daily_income(&requests::DailyIncomeQuery { date })
            .await
            .map_err(|e| e.to_string())
    });

    let monthly = use_fetch((date.year(), date.month()), |(year, month)| {
        async move {
            get_api_client()
                .monthly_income(&requests::MonthlyIncomeQuery { year, month })
                .await
                .map_err(|e| e.to_string())
        }
    });

    let filter = PaymentFilter {
        from: date.first_of_month(),
        to: date.last_of_month(),
        student_id: None,
    };
    let payments =
        use_paginated_fetch(filter, |filter, page: u32| async move {
            get_api_client()
                .list_payments(&requests::ListPayments {
                    filter,
                    page,
                    page_size: DEFAULT_PAGE_SIZE,
                })
                .await
                .map_err(|e| e.to_string())
        });

    let on_date_change = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<Date>() {
                Ok(value) => date.set(value),
                Err(e) => tracing::debug!("ignoring date input: {e}"),
            }
        })
    };

    let list = &payments.state;

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-neutral-900">{"Income"}</h1>
                <input
                    type="date"
                    value={date.to_string()}
                    onchange={on_date_change}
                    class="px-3 py-2 border border-neutral-300 rounded-md"
                />
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {daily.render("daily income", |income, is_loading, error| {
                    daily_card(income, is_loading, error)
                })}
                {monthly.render("monthly income", |income, is_loading, error| {
                    monthly_card(income, is_loading, error)
                })}
            </div>
            <div>
                <h2 class="text-lg font-semibold">{"Payments this month"}</h2>
                if let Some(error) = &list.last_error {
                    <div class="p-3 rounded-md bg-red-50 border border-red-200">
                        <p class="text-sm text-red-700">{error}</p>
                    </div>
                }
                if list.is_blank_loading() {
                    <p class="text-neutral-600 py-4">{"Loading payments..."}</p>
                } else {
                    <ul class="divide-y divide-neutral-200">
                        {for list.items.iter().map(payment_row)}
                    </ul>
                }
                <LoadMoreControls
                    loaded_count={list.items.len()}
                    has_more={list.has_more}
                    is_loading_more={list.is_loading_more}
                    on_load_more={payments.load_more.clone()}
                />
            </div>
        </div>
    }
}

fn card(
    title: String,
    body: Html,
    is_loading: bool,
    error: Option<&String>,
) -> Html {
    html! {
        <div class="p-4 rounded-md border border-neutral-200">
            <div class="flex items-center justify-between">
                <h2 class="text-sm font-medium text-neutral-600">{title}</h2>
                if is_loading {
                    <span class="text-xs text-neutral-400">{"Updating..."}</span>
                }
            </div>
            {body}
            if let Some(error) = error {
                <p class="text-xs text-red-700">{error}</p>
            }
        </div>
    }
}

fn daily_card(
    income: &responses::DailyIncome,
    is_loading: bool,
    error: Option<&String>,
) -> Html {
    let body = html! {
        <>
            <p class="text-3xl font-bold">{format!("${}", income.total)}</p>
            <p class="text-sm text-neutral-600">
                {format!("{} payments", income.payment_count)}
            </p>
            <ul class="text-sm">
                {for income.by_method.iter().map(|m| html! {
                    <li>{format!("{}: ${}", m.method, m.total)}</li>
                })}
            </ul>
        </>
    };
    card(format!("Income on {}", income.date), body, is_loading, error)
}

fn monthly_card(
    income: &responses::MonthlyIncome,
    is_loading: bool,
    error: Option<&String>,
) -> Html {
    let body = html! {
        <>
            <p class="text-3xl font-bold">{format!("${}", income.total)}</p>
            <p class="text-sm text-neutral-600">
                {format!("{} days with payments", income.days.len())}
            </p>
        </>
    };
    let title = format!("Income for {}-{:02}", income.year, income.month);
    card(title, body, is_loading, error)
}

fn payment_row(payment: &Payment) -> Html {
    html! {
        <li key={payment.id.0} class="flex items-center justify-between py-2 text-sm">
            <div>
                <p class="font-medium">{&payment.student_name}</p>
                <p class="text-neutral-500">
                    {format!("{} · {}", payment.paid_on, payment.method)}
                </p>
            </div>
            <span>{format!("${}", payment.amount)}</span>
        </li>
    }
}
