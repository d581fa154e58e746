use yew::prelude::*;

use common::{Notification, NotificationKind};

fn alert_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "alert-info",
        NotificationKind::Success => "alert-success",
        NotificationKind::Error => "alert-error",
    }
}

fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "fas fa-info-circle",
        NotificationKind::Success => "fas fa-check-circle",
        NotificationKind::Error => "fas fa-exclamation-circle",
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    /// Newest first
    pub notifications: Vec<Notification>,
    pub on_dismiss: Callback<u64>,
}

/// Dismissible notifications stacked at the top of the page.
#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast toast-top toast-end z-50">
            {for props.notifications.iter().map(|notification| {
                let id = notification.id;
                let on_close = {
                    let on_dismiss = props.on_dismiss.clone();
                    Callback::from(move |_| {
                        log::trace!("Notification {} dismissed", id);
                        on_dismiss.emit(id)
                    })
                };

                html! {
                    <div key={id} role="alert" class={classes!("alert", alert_class(notification.kind), "shadow-lg")}>
                        <i class={icon(notification.kind)}></i>
                        <span>{&notification.message}</span>
                        <button type="button" class="btn btn-sm btn-ghost btn-circle" aria-label="Close" onclick={on_close}>
                            <i class="fas fa-times"></i>
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
