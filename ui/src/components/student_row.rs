use payloads::{GroupId, Student};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StudentRowProps {
    pub student: Student,
    /// Mark the student present (true) or absent (false) for today.
    pub on_toggle_attendance: Callback<(Student, bool)>,
    pub on_select_group: Callback<GroupId>,
    #[prop_or(false)]
    pub is_saving: bool,
}

#[function_component]
pub fn StudentRow(props: &StudentRowProps) -> Html {
    let student = &props.student;

    let on_toggle = {
        let student = student.clone();
        let on_toggle_attendance = props.on_toggle_attendance.clone();
        Callback::from(move |_: MouseEvent| {
            let present = !student.present_today;
            on_toggle_attendance.emit((student.clone(), present));
        })
    };

    let on_group = {
        let group_id = student.group_id;
        let on_select_group = props.on_select_group.clone();
        Callback::from(move |_: MouseEvent| on_select_group.emit(group_id))
    };

    let (label, class) = if student.present_today {
        ("Present", "bg-green-600 text-white")
    } else {
        ("Absent", "bg-neutral-100 text-neutral-700")
    };

    html! {
        <li class="flex items-center justify-between py-3">
            <div>
                <p class={classes!("font-medium", (!student.is_active).then_some("text-neutral-400"))}>
                    {&student.full_name}
                </p>
                <button onclick={on_group} class="text-xs text-neutral-500 underline">
                    {&student.group_name}
                </button>
            </div>
            <button
                onclick={on_toggle}
                disabled={props.is_saving}
                class={classes!("px-3", "py-1", "rounded-full", "text-sm", class)}
            >
                {label}
            </button>
        </li>
    }
}
