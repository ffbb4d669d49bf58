use payloads::{
    GroupId, Student, StudentFilter, StudentId, requests,
    requests::DEFAULT_PAGE_SIZE,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{LoadMoreControls, RequireAuth, StudentRow};
use crate::hooks::use_paginated_fetch;
use crate::{State, get_api_client, sync_session_state};

#[function_component]
pub fn StudentsPage() -> Html {
    html! {
        <RequireAuth>
            <StudentsList />
        </RequireAuth>
    }
}

#[function_component]
fn StudentsList() -> Html {
    let (_state, dispatch) = use_store::<State>();
    let filter = use_state(StudentFilter::default);
    let saving = use_state(|| None::<StudentId>);
    let action_error = use_state(|| None::<String>);

    let students =
        use_paginated_fetch((*filter).clone(), |filter, page: u32| async move {
            get_api_client()
                .list_students(&requests::ListStudents {
                    filter,
                    page,
                    page_size: DEFAULT_PAGE_SIZE,
                })
                .await
                .map_err(|e| e.to_string())
        });
    let list = &students.state;

    // A 401 clears the session inside the client; mirror that in the store
    {
        let dispatch = dispatch.clone();
        use_effect_with(list.last_error.clone(), move |error| {
            if error.is_some() {
                sync_session_state(&dispatch);
            }
        });
    }

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            filter.set(StudentFilter {
                search: (!value.trim().is_empty()).then_some(value),
                ..(*filter).clone()
            });
        })
    };

    let on_toggle_active = {
        let filter = filter.clone();
        Callback::from(move |_: Event| {
            filter.set(StudentFilter {
                active_only: !filter.active_only,
                ..(*filter).clone()
            });
        })
    };

    let on_select_group = {
        let filter = filter.clone();
        Callback::from(move |group_id: GroupId| {
            filter.set(StudentFilter {
                group_id: Some(group_id),
                ..(*filter).clone()
            });
        })
    };

    let on_clear_group = {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| {
            filter.set(StudentFilter {
                group_id: None,
                ..(*filter).clone()
            });
        })
    };

    let on_refresh = {
        let reload = students.reload.clone();
        Callback::from(move |_: MouseEvent| reload.emit(()))
    };

    // Apply the change locally only once the backend has recorded it
    let on_toggle_attendance = {
        let saving = saving.clone();
        let action_error = action_error.clone();
        let set_items = students.set_items.clone();
        let dispatch = dispatch.clone();

        Callback::from(move |(student, present): (Student, bool)| {
            let saving = saving.clone();
            let action_error = action_error.clone();
            let set_items = set_items.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                saving.set(Some(student.id));
                action_error.set(None);

                let request = requests::MarkAttendance {
                    student_id: student.id,
                    date: jiff::Zoned::now().date(),
                    present,
                };
                match get_api_client().mark_attendance(&request).await {
                    Ok(entry) => {
                        set_items.emit(Box::new(move |items: Vec<Student>| {
                            items
                                .into_iter()
                                .map(|mut s| {
                                    if s.id == entry.student_id {
                                        s.present_today = entry.present;
                                    }
                                    s
                                })
                                .collect()
                        }));
                    }
                    Err(e) => {
                        tracing::warn!(
                            student_id = %student.id,
                            "failed to mark attendance: {e}"
                        );
                        action_error.set(Some(e.to_string()));
                        sync_session_state(&dispatch);
                    }
                }

                saving.set(None);
            });
        })
    };

    let group_chip = filter.group_id.map(|group_id| {
        let name = list
            .items
            .iter()
            .find(|s| s.group_id == group_id)
            .map(|s| s.group_name.clone())
            .unwrap_or_else(|| format!("Group {group_id}"));
        html! {
            <span class="inline-flex items-center gap-1 px-2 py-1 rounded-full bg-neutral-100 text-sm">
                {name}
                <button onclick={on_clear_group} class="text-neutral-500">
                    {"×"}
                </button>
            </span>
        }
    });

    let body = if list.is_blank_loading() {
        html! {
            <div class="text-center py-6">
                <p class="text-neutral-600">{"Loading students..."}</p>
            </div>
        }
    } else if list.items.is_empty() && list.last_error.is_none() {
        html! {
            <div class="text-center py-6">
                <p class="text-neutral-600">{"No students match this filter"}</p>
            </div>
        }
    } else {
        html! {
            <ul class="divide-y divide-neutral-200">
                {for list.items.iter().map(|student| html! {
                    <StudentRow
                        key={student.id.0}
                        student={student.clone()}
                        on_toggle_attendance={on_toggle_attendance.clone()}
                        on_select_group={on_select_group.clone()}
                        is_saving={*saving == Some(student.id)}
                    />
                })}
            </ul>
        }
    };

    let error = list.last_error.as_ref().or((*action_error).as_ref());

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-neutral-900">{"Students"}</h1>
                <button
                    onclick={on_refresh}
                    disabled={list.is_busy()}
                    class="px-3 py-1 border border-neutral-300 rounded-md text-sm"
                >
                    {if list.is_refreshing { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>
            <div class="flex flex-wrap items-center gap-3">
                <input
                    type="search"
                    placeholder="Search by name"
                    value={filter.search.clone().unwrap_or_default()}
                    oninput={on_search}
                    class="px-3 py-2 border border-neutral-300 rounded-md"
                />
                <label class="flex items-center gap-2 text-sm">
                    <input
                        type="checkbox"
                        checked={filter.active_only}
                        onchange={on_toggle_active}
                    />
                    {"Active only"}
                </label>
                {for group_chip}
            </div>
            if let Some(error) = error {
                <div class="p-3 rounded-md bg-red-50 border border-red-200">
                    <p class="text-sm text-red-700">{error}</p>
                </div>
            }
            {body}
            <LoadMoreControls
                loaded_count={list.items.len()}
                has_more={list.has_more}
                is_loading_more={list.is_loading_more}
                on_load_more={students.load_more.clone()}
            />
        </div>
    }
}
