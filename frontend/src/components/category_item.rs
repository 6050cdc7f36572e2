use yew::prelude::*;

use crate::models::Category;

#[derive(Properties, PartialEq, Clone)]
pub struct CategoryItemProps {
    pub category: Category,
    pub selected_category: AttrValue,
    pub on_select: Callback<String>,
}

/// One selectable entry in the categories drawer. Clicking emits the
/// category's shortname (empty for the "All" entry).
#[function_component(CategoryItem)]
pub fn category_item(props: &CategoryItemProps) -> Html {
    let selected = props.category.shortname == *props.selected_category;

    let onclick = {
        let on_select = props.on_select.clone();
        let shortname = props.category.shortname.clone();
        Callback::from(move |_| on_select.emit(shortname.clone()))
    };

    html! {
        <li class={classes!("category-item", selected.then_some("selected"))} {onclick}>
            { &props.category.name }
        </li>
    }
}
