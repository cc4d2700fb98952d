use leptos::*;
use leptos_meta::Title;

use crate::config::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <Title text=APP_NAME/>
        <header>
            <h1 class="title">{APP_NAME}</h1>
        </header>
    }
}
