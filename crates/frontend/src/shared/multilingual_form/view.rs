use super::view_model::MultilingualFormVm;
use crate::shared::api::BrowserFile;
use crate::shared::components::ui::{Input, RadioGroup, Textarea};
use crate::shared::config::config;
use crate::shared::form_engine::binder::{
    localized_path, meta_name_path, meta_value_path, row_path, side_text_path, side_url_path,
    DEFAULT_PRIMARY_META,
};
use crate::shared::form_engine::{
    CollectionSpec, FieldSpec, FormDescriptor, ImageRequirement, ImageStatus, SideDraft, SideKind,
    SideSpec,
};
use crate::shared::icons::icon;
use contracts::shared::Lang;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize, Flex, FlexAlign, FlexGap, Spinner, SpinnerSize};
use web_sys::HtmlInputElement;

/// Edit or create form for any resource described by a `FormDescriptor`
#[component]
pub fn MultilingualForm(
    descriptor: FormDescriptor,
    /// `None` opens an empty create form
    id: Option<i64>,
) -> impl IntoView {
    let localized = descriptor.localized.clone();
    let plain = descriptor.plain.clone();
    let has_slug = descriptor.slug;
    let image = descriptor.image;
    let has_meta = descriptor.meta;
    let sides = descriptor.sides.clone();
    let collections = descriptor.collections.clone();

    let vm = MultilingualFormVm::new(descriptor, id);
    vm.mount();
    on_cleanup(move || vm.teardown());

    let image_required = image == ImageRequirement::Required;

    view! {
        <div class="details-container">
            <FormHeader vm=vm />
            <LanguageTabs vm=vm />

            <Show when=move || vm.is_loading()>
                <div class="details-loading">
                    <Spinner size=SpinnerSize::Small />
                    " Loading..."
                </div>
            </Show>

            <div class="details-form">
                {localized
                    .into_iter()
                    .map(|field| view! { <LocalizedField vm=vm field=field /> })
                    .collect_view()}
                {has_slug.then(|| view! { <SlugField vm=vm /> })}
                {plain
                    .into_iter()
                    .map(|field| view! { <PlainField vm=vm field=field /> })
                    .collect_view()}
                {(image != ImageRequirement::None)
                    .then(|| view! { <ImageField vm=vm required=image_required /> })}
                {sides
                    .into_iter()
                    .map(|side| view! { <SideEditor vm=vm side=side /> })
                    .collect_view()}
                {collections
                    .into_iter()
                    .map(|collection| view! { <CollectionEditor vm=vm collection=collection /> })
                    .collect_view()}
                {has_meta.then(|| view! { <MetaEditor vm=vm /> })}
            </div>
        </div>
    }
}

#[component]
fn FormHeader(vm: MultilingualFormVm) -> impl IntoView {
    let title = vm.title();

    view! {
        <div class="details-header">
            <h2 class="details-header__title">{title}</h2>
            <div class="details-header__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save()
                    disabled=Signal::derive(move || vm.is_busy())
                >
                    {icon("save")}
                    {move || if vm.is_submitting() { "Saving..." } else { "Save" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.cancel()
                >
                    {icon("x")}
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

/// One button per language; the mandatory one is starred
#[component]
fn LanguageTabs(vm: MultilingualFormVm) -> impl IntoView {
    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            {Lang::ALL
                .into_iter()
                .map(|lang| {
                    view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if vm.active_lang() == lang {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            size=ButtonSize::Small
                            on_click=move |_| vm.switch_language(lang)
                        >
                            {lang.label()}
                            {lang.is_required().then_some(" *")}
                            {move || vm.is_visited(lang).then(|| view! {
                                <span class="lang-tab__visited" title="Loaded"></span>
                            })}
                        </Button>
                    }
                })
                .collect_view()}
            <Show when=move || vm.has_unsaved_edits()>
                <span class="details-unsaved">"Unsaved changes"</span>
            </Show>
        </Flex>
    }
}

fn field_label(field: &FieldSpec, lang: Lang) -> String {
    let mandatory = field.rules.required && lang.is_required();
    format!(
        "{} ({}){}",
        field.label,
        lang.label(),
        if mandatory { " *" } else { "" }
    )
}

/// Text input or textarea, depending on the field
fn text_control(
    multiline: bool,
    label: Signal<Option<String>>,
    value: Signal<String>,
    error: Signal<Option<String>>,
    on_input: Callback<String>,
) -> AnyView {
    if multiline {
        view! { <Textarea label=label value=value on_input=on_input error=error /> }.into_any()
    } else {
        view! { <Input label=label value=value on_input=on_input error=error /> }.into_any()
    }
}

#[component]
fn LocalizedField(vm: MultilingualFormVm, field: FieldSpec) -> impl IntoView {
    let name = field.name;
    let multiline = field.multiline;
    let label = Signal::derive(move || Some(field_label(&field, vm.active_lang())));
    let value = Signal::derive(move || {
        let lang = vm.active_lang();
        vm.read(|s| s.values().localized(name, lang).to_string())
            .unwrap_or_default()
    });
    let error = Signal::derive(move || vm.field_error(&localized_path(name, vm.active_lang())));
    let on_input = Callback::new(move |text: String| {
        let lang = vm.current_lang();
        vm.edit(move |b| b.set_localized(name, lang, text));
    });

    text_control(multiline, label, value, error, on_input)
}

#[component]
fn PlainField(vm: MultilingualFormVm, field: FieldSpec) -> impl IntoView {
    let name = field.name;
    let value = Signal::derive(move || {
        vm.read(|s| s.values().plain(name).to_string())
            .unwrap_or_default()
    });

    view! {
        <Input
            label=field.label
            required=field.rules.required
            value=value
            on_input=Callback::new(move |text: String| {
                vm.edit(move |b| b.set_plain(name, text));
            })
            error=Signal::derive(move || vm.field_error(name))
        />
    }
}

#[component]
fn SlugField(vm: MultilingualFormVm) -> impl IntoView {
    let value = Signal::derive(move || {
        vm.read(|s| s.values().slug.clone()).unwrap_or_default()
    });

    view! {
        <Input
            label="Slug"
            required=true
            placeholder="my-page-url"
            value=value
            on_input=Callback::new(move |text: String| {
                vm.edit(move |b| b.set_slug(text));
            })
            error=Signal::derive(move || vm.field_error("slug"))
        />
    }
}

/// Pick, preview and upload the image. Saving needs an uploaded image, not just a picked one.
#[component]
fn ImageField(vm: MultilingualFormVm, required: bool) -> impl IntoView {
    let accept = config().upload.allowed_mime_types.join(",");
    let status = Signal::derive(move || vm.image_status());

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            vm.select_file(BrowserFile::new(file));
        }
        // Same file can be picked again after a rejection
        input.set_value("");
    };

    let status_text = move || match status.get() {
        ImageStatus::Empty => "No image".to_string(),
        ImageStatus::Selected => match vm.staged_file_name() {
            Some(name) => format!("{} selected, not uploaded yet", name),
            None => "Selected, not uploaded yet".to_string(),
        },
        ImageStatus::Uploading => "Uploading...".to_string(),
        ImageStatus::Uploaded => "Uploaded".to_string(),
        ImageStatus::UploadFailed => "Upload failed, try again".to_string(),
    };

    view! {
        <div class="form__group image-field">
            <label class="form__label">
                "Image"
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {move || vm.image_url().map(|url| view! {
                <img class="image-field__preview" src=url alt="" />
            })}
            <input
                type="file"
                class="form__file"
                accept=accept
                disabled=move || status.get() == ImageStatus::Uploading
                on:change=on_change
            />
            <div class="image-field__status">
                {move || (status.get() == ImageStatus::Uploading)
                    .then(|| view! { <Spinner size=SpinnerSize::Small /> })}
                {status_text}
            </div>
            <Input
                label="Alt text"
                value=vm.alt_text
                on_input=Callback::new(move |text: String| vm.alt_text.set(text))
            />
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=move |_| vm.upload_image()
                    disabled=Signal::derive(move || {
                        !matches!(status.get(), ImageStatus::Selected | ImageStatus::UploadFailed)
                    })
                >
                    {icon("upload")}
                    "Upload"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.clear_image()
                    disabled=Signal::derive(move || {
                        matches!(status.get(), ImageStatus::Empty | ImageStatus::Uploading)
                    })
                >
                    {icon("trash")}
                    "Remove"
                </Button>
            </Flex>
            {move || vm.image_error().map(|e| view! { <div class="form__error">{e}</div> })}
            {move || vm.field_error("image").map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}

#[component]
fn MetaEditor(vm: MultilingualFormVm) -> impl IntoView {
    let count = Memo::new(move |_| vm.read(|s| s.values().meta_rows().count()).unwrap_or(0));

    view! {
        <fieldset class="form__fieldset">
            <legend class="form__legend">"Meta"</legend>
            <For
                each=move || 0..count.get()
                key=|index| *index
                children=move |index| view! { <MetaRowEditor vm=vm index=index /> }
            />
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| vm.edit(|b| b.add_meta().is_some())
            >
                {icon("plus")}
                "Add meta"
            </Button>
        </fieldset>
    }
}

/// Row 0 is the primary meta and cannot be removed
#[component]
fn MetaRowEditor(vm: MultilingualFormVm, index: usize) -> impl IntoView {
    let placeholder = if index == 0 { DEFAULT_PRIMARY_META } else { "" };
    let name = Signal::derive(move || {
        vm.read(|s| s.values().meta_row(index).map(|row| row.name.clone()))
            .flatten()
            .unwrap_or_default()
    });
    let value = Signal::derive(move || {
        let lang = vm.active_lang();
        vm.read(|s| s.values().meta_row(index).map(|row| row.values.get(lang).clone()))
            .flatten()
            .unwrap_or_default()
    });
    let value_label = Signal::derive(move || Some(format!("Value ({})", vm.active_lang().label())));

    view! {
        <div class="meta-row">
            <Input
                label="Name"
                placeholder=placeholder
                value=name
                on_input=Callback::new(move |text: String| {
                    vm.edit(move |b| b.set_meta_name(index, text));
                })
                error=Signal::derive(move || vm.field_error(&meta_name_path(index)))
            />
            <Input
                label=value_label
                value=value
                on_input=Callback::new(move |text: String| {
                    let lang = vm.current_lang();
                    vm.edit(move |b| b.set_meta_value(index, lang, text));
                })
                error=Signal::derive(move || {
                    vm.field_error(&meta_value_path(index, vm.active_lang()))
                })
            />
            {(index > 0).then(|| view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.edit(|b| b.remove_meta(index))
                >
                    {icon("trash")}
                </Button>
            })}
        </div>
    }
}

/// A page-section half that holds either localized text or an image URL
#[component]
fn SideEditor(vm: MultilingualFormVm, side: SideSpec) -> impl IntoView {
    let name = side.name;
    let text_field = side.text_field;
    let kind = Memo::new(move |_| {
        vm.read(|s| s.values().side(name).map(SideDraft::kind))
            .flatten()
            .unwrap_or(SideKind::Text)
    });

    let text_value = Signal::derive(move || {
        let lang = vm.active_lang();
        vm.read(|s| match s.values().side(name) {
            Some(SideDraft::Text(map)) => map.get(lang).clone(),
            _ => String::new(),
        })
        .unwrap_or_default()
    });
    let url_value = Signal::derive(move || {
        vm.read(|s| match s.values().side(name) {
            Some(SideDraft::Image { url }) => url.clone(),
            _ => String::new(),
        })
        .unwrap_or_default()
    });
    let text_name = text_field.name;
    let multiline = text_field.multiline;
    let text_label = Signal::derive(move || Some(field_label(&text_field, vm.active_lang())));
    let text_error = Signal::derive(move || {
        vm.field_error(&side_text_path(name, text_name, vm.active_lang()))
    });
    let on_text = Callback::new(move |text: String| {
        let lang = vm.current_lang();
        vm.edit(move |b| b.set_side_text(name, lang, text));
    });

    view! {
        <fieldset class="form__fieldset">
            <legend class="form__legend">{side.label}</legend>
            <RadioGroup
                name=name
                value=Signal::derive(move || kind.get().code().to_string())
                options=vec![("text", "Text"), ("image", "Image")]
                on_change=Callback::new(move |code: String| {
                    let kind = if code == SideKind::Image.code() {
                        SideKind::Image
                    } else {
                        SideKind::Text
                    };
                    vm.edit(move |b| b.set_side_kind(name, kind));
                })
            />
            {move || match kind.get() {
                SideKind::Text => text_control(multiline, text_label, text_value, text_error, on_text),
                SideKind::Image => view! {
                    <Input
                        label="Image URL"
                        input_type="url"
                        value=url_value
                        on_input=Callback::new(move |text: String| {
                            vm.edit(move |b| b.set_side_url(name, text));
                        })
                        error=Signal::derive(move || vm.field_error(&side_url_path(name)))
                    />
                }
                .into_any(),
            }}
        </fieldset>
    }
}

#[component]
fn CollectionEditor(vm: MultilingualFormVm, collection: CollectionSpec) -> impl IntoView {
    let name = collection.name;
    let fields = StoredValue::new(collection.fields);
    let count = Memo::new(move |_| vm.read(|s| s.values().rows(name).len()).unwrap_or(0));

    view! {
        <fieldset class="form__fieldset">
            <legend class="form__legend">{collection.label}</legend>
            <For
                each=move || 0..count.get()
                key=|index| *index
                children=move |index| view! {
                    <CollectionRowEditor
                        vm=vm
                        collection=name
                        index=index
                        fields=fields.get_value()
                    />
                }
            />
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| vm.edit(|b| b.add_row(name).is_some())
            >
                {icon("plus")}
                "Add row"
            </Button>
        </fieldset>
    }
}

#[component]
fn CollectionRowEditor(
    vm: MultilingualFormVm,
    collection: &'static str,
    index: usize,
    fields: Vec<FieldSpec>,
) -> impl IntoView {
    view! {
        <div class="collection-row">
            <div class="collection-row__header">
                <span>{format!("#{}", index + 1)}</span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.edit(|b| b.remove_row(collection, index))
                >
                    {icon("trash")}
                </Button>
            </div>
            {fields
                .into_iter()
                .map(|field| {
                    let name = field.name;
                    let multiline = field.multiline;
                    let label = Signal::derive(move || Some(field_label(&field, vm.active_lang())));
                    let value = Signal::derive(move || {
                        let lang = vm.active_lang();
                        vm.read(|s| {
                            s.values()
                                .rows(collection)
                                .get(index)
                                .map(|row| row.value(name, lang).to_string())
                        })
                        .flatten()
                        .unwrap_or_default()
                    });
                    let error = Signal::derive(move || {
                        vm.field_error(&row_path(collection, index, name, vm.active_lang()))
                    });
                    let on_input = Callback::new(move |text: String| {
                        let lang = vm.current_lang();
                        vm.edit(move |b| b.set_row_value(collection, index, name, lang, text));
                    });
                    text_control(multiline, label, value, error, on_input)
                })
                .collect_view()}
        </div>
    }
}
