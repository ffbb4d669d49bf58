use crate::components::layout::Header;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-white text-gray-900">
            <Header />
            <main class="max-w-3xl mx-auto px-4 py-6">
                {for props.children.iter()}
            </main>
        </div>
    }
}
