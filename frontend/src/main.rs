mod api;
mod components;
mod models;
mod pages;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <pages::ReaderPage />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
