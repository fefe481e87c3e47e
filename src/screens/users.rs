//! Users Screen
//!
//! User list, the name/email projection panel, and the partial update form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{list_user_projections, list_users, update_user, Ack, ApiResult, Refreshed, Transport};
use crate::components::{alert, load_into, toggle_lazy, PanelStatus, StatusMessage};
use crate::context::use_app_context;
use crate::forms::UserUpdateForm;
use crate::models::{format_date, User, UserProjection};
use crate::state::{LazyPanel, LoadState};

const LOAD_FAILED: &str = "Error al cargar usuarios";

/// Validate, send the patch, then reload the list
pub async fn submit_update(api: &dyn Transport, form: &UserUpdateForm) -> ApiResult<Refreshed<Ack, Vec<User>>> {
    let (email, patch) = form.validate()?;
    let receipt = update_user(api, &email, &patch).await?;
    Ok(receipt.refresh(|| list_users(api)).await)
}

fn update_input(
    form: RwSignal<Option<UserUpdateForm>>,
    placeholder: &'static str,
    get: fn(&UserUpdateForm) -> &String,
    set: fn(&mut UserUpdateForm, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            placeholder=placeholder
            prop:value=move || form.with(|f| f.as_ref().map(|f| get(f).clone()).unwrap_or_default())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| {
                    if let Some(f) = f {
                        set(f, value);
                    }
                });
            }
        />
    }
}

#[component]
pub fn UsersScreen() -> impl IntoView {
    let ctx = use_app_context();

    let users = RwSignal::new(LoadState::<Vec<User>>::default());
    let projection = RwSignal::new(LazyPanel::<Vec<UserProjection>>::default());
    let editing = RwSignal::new(None::<UserUpdateForm>);
    let (notice, set_notice) = signal(None::<String>);

    let api = ctx.transport();
    load_into(users, LOAD_FAILED, async move { list_users(&api).await });

    let on_toggle_projection = move |_| {
        let api = ctx.transport();
        toggle_lazy(projection, "Error al cargar la proyección", move || async move {
            list_user_projections(&api).await
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = editing.get_untracked() else {
            return;
        };
        let api = ctx.transport();
        spawn_local(async move {
            match submit_update(&api, &form).await {
                Ok(done) => {
                    set_notice.set(Some(
                        done.ack.message.unwrap_or_else(|| "Usuario actualizado".to_string()),
                    ));
                    editing.update(|f| {
                        if let Some(f) = f {
                            f.clear_changes();
                        }
                    });
                    users.update(|s| s.finish(done.refreshed, LOAD_FAILED));
                }
                Err(err) => {
                    tracing::warn!("user update failed: {}", err);
                    alert(&err.user_message("Error al actualizar usuario"));
                }
            }
        });
    };

    view! {
        <div class="screen users-screen">
            <h1>"Usuarios"</h1>

            <div class="toolbar">
                <button on:click=on_toggle_projection>
                    {move || if projection.with(LazyPanel::is_shown) { "Ver lista completa" } else { "Ver proyección" }}
                </button>
                <button on:click=move |_| {
                    set_notice.set(None);
                    editing.update(|f| {
                        *f = match f.take() {
                            Some(_) => None,
                            None => Some(UserUpdateForm::default()),
                        }
                    });
                }>
                    {move || if editing.with(Option::is_some) { "Cancelar" } else { "Actualizar usuario" }}
                </button>
            </div>

            <Show when=move || editing.with(Option::is_some)>
                <form class="edit-form" on:submit=on_submit>
                    {update_input(editing, "Correo del usuario", |f| &f.email, |f, v| f.email = v)}
                    {update_input(editing, "Nuevo nombre", |f| &f.name, |f, v| f.name = v)}
                    {update_input(editing, "Nuevo teléfono", |f| &f.phone, |f, v| f.phone = v)}
                    {update_input(editing, "Nuevo municipio", |f| &f.municipality, |f, v| f.municipality = v)}
                    <button type="submit">"Guardar"</button>
                </form>
            </Show>

            <StatusMessage message=notice info=true />
            <PanelStatus
                loading=Signal::derive(move || projection.with(LazyPanel::is_loading))
                error=Signal::derive(move || projection.with(|p| p.error().map(str::to_string)))
            />

            <Show
                when=move || projection.with(LazyPanel::is_shown)
                fallback=move || view! {
                    <Show when=move || users.with(LoadState::is_loading)>
                        <div class="loading">"Cargando..."</div>
                    </Show>
                    <StatusMessage message=Signal::derive(move || users.with(|s| s.error().map(str::to_string))) />
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Nombre"</th>
                                <th>"Correo"</th>
                                <th>"Teléfono"</th>
                                <th>"Municipio"</th>
                                <th>"Registro"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.with(LoadState::rows)
                                key=|user| user.id.clone()
                                children=move |user| view! {
                                    <tr>
                                        <td>{user.name}</td>
                                        <td>{user.email}</td>
                                        <td>{user.phone}</td>
                                        <td>{user.address.municipality}</td>
                                        <td>{format_date(&user.registered_at)}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                }
            >
                <ul class="projection-list">
                    <For
                        each=move || projection.with(|p| p.shown().cloned().unwrap_or_default())
                        key=|p| p.email.clone()
                        children=move |p| view! {
                            <li><strong>{p.name}</strong>" - "{p.email}</li>
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
