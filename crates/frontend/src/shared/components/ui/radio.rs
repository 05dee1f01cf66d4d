use leptos::prelude::*;

/// Group of radio buttons over a fixed set of `(value, label)` options
#[component]
pub fn RadioGroup(
    /// Label for the group
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Current selected value
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Name attribute (for grouping)
    #[prop(into)]
    name: String,
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">{l}</label>
            })}
            <div class="form__radio-group">
                {options
                    .into_iter()
                    .map(|(val, lbl)| {
                        let radio_id = format!("radio-{}-{}", name, val);
                        view! {
                            <div class="form__radio-wrapper">
                                <input
                                    id=radio_id.clone()
                                    type="radio"
                                    class="form__radio"
                                    name=name.clone()
                                    value=val
                                    prop:checked=move || value.get() == val
                                    on:change=move |_| {
                                        if let Some(handler) = on_change {
                                            handler.run(val.to_string());
                                        }
                                    }
                                />
                                <label class="form__radio-label" for=radio_id>
                                    {lbl}
                                </label>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
