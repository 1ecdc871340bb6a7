//! Server-rendered HTML for the lookup and detail screens

use claim_flow::{
    ChatMessage, Claim, DetailSession, FileDescriptor, LookupFailure, LookupForm, Sender,
};
use leptos::prelude::*;

use crate::models::session_path;

const TITLE: &str = "Claim Portal";

/// Render a page component to a complete HTML document
fn render_document<F, V>(page: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    let html = owner.with(|| page().to_html());
    format!("<!DOCTYPE html>{html}")
}

/// Page shell shared by every screen
#[component]
fn Layout(
    /// Load the upload script at the end of the body.
    #[prop(default = false)]
    with_upload_script: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{TITLE}</title>
                <link rel="stylesheet" href="/assets/portal.css" />
            </head>
            <body>
                {children()}
                {with_upload_script.then(|| view! { <script src="/assets/upload.js"></script> })}
            </body>
        </html>
    }
}

#[component]
fn LookupScreen(form: LookupForm) -> impl IntoView {
    let alert = (form.error == Some(LookupFailure::InvalidClaimId)).then(|| {
        view! {
            <div class="alert" role="alert">
                {format!("❌ {}", LookupFailure::InvalidClaimId.message())}
            </div>
        }
    });
    let inline_error = (form.error == Some(LookupFailure::Required)).then(|| {
        view! { <span class="field-error">{LookupFailure::Required.message()}</span> }
    });

    view! {
        <Layout>
            <main class="login">
                <section class="card">
                    <h1>{TITLE}</h1>
                    <p class="hint">"Enter claim ID below to check your claim status"</p>
                    {alert}
                    <form method="post" action="/" class="lookup-form">
                        <input type="text" name="claim_id" placeholder="Claim ID" value=form.input />
                        <button type="submit">"View Claim"</button>
                    </form>
                    {inline_error}
                </section>
            </main>
        </Layout>
    }
}

/// Terminal view for an unknown routed id; it offers no actions
#[component]
fn NotFoundScreen(routed_id: String) -> impl IntoView {
    view! {
        <Layout>
            <main class="not-found" data-routed-id=routed_id>
                <h1>"❌ Claim not found"</h1>
            </main>
        </Layout>
    }
}

#[component]
fn ErrorScreen(message: String) -> impl IntoView {
    view! {
        <Layout>
            <main class="not-found">
                <h1>"Something went wrong"</h1>
                <p>{message}</p>
            </main>
        </Layout>
    }
}

#[component]
fn Field(
    label: &'static str,
    value: String,
    #[prop(default = "value")] value_class: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <p class="label">{label}</p>
            <p class=value_class>{value}</p>
        </div>
    }
}

#[component]
fn DeviceDetails(claim: Claim) -> impl IntoView {
    view! {
        <section class="panel">
            <h2>"Device Details"</h2>
            <Field label="Value" value=claim.value />
            <Field label="Device" value=claim.device />
            <Field label="Purchase Date" value=claim.purchase_date />
            <Field label="Type" value=claim.device_type />
            <Field label="Serial Number" value=claim.serial />
        </section>
    }
}

#[component]
fn UploadList(files: Vec<FileDescriptor>) -> impl IntoView {
    if files.is_empty() {
        return view! { <p class="boxed">"No document uploaded"</p> }.into_any();
    }
    view! {
        <ul class="files">
            {files
                .into_iter()
                .map(|file| view! { <li>{format!("📄 {} ({})", file.name, file.display_size())}</li> })
                .collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
fn ActionsPanel(claim: Claim, files: Vec<FileDescriptor>, upload_url: String) -> impl IntoView {
    view! {
        <section class="panel">
            <h2>"Actions"</h2>
            <input type="file" multiple=true id="fileUpload" class="hidden" data-upload-url=upload_url />
            <label for="fileUpload" class="button">"Upload Document"</label>
            <div class="uploads">
                <p class="label">"Uploaded Documents"</p>
                <UploadList files=files />
            </div>
            <h3>"Incident Details"</h3>
            <Field label="Issue" value=claim.issue value_class="boxed" />
            <Field label="Cause" value=claim.cause value_class="boxed" />
            <Field label="Date of Incident" value=claim.date value_class="boxed" />
        </section>
    }
}

#[component]
fn ChatPanel(
    status: String,
    messages: Vec<ChatMessage>,
    draft: String,
    action: String,
) -> impl IntoView {
    view! {
        <section class="panel chat-panel">
            <h2>"Status"</h2>
            <p class="status">{status}</p>
            <h2>"Chat"</h2>
            <div class="messages">
                {messages
                    .into_iter()
                    .map(|msg| {
                        let side = match msg.sender {
                            Sender::User => "msg user",
                            Sender::Insurer => "msg insurer",
                        };
                        view! {
                            <div class=side>
                                <span class="sender">{msg.sender.label()}</span>
                                <div class="bubble">{msg.text}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <form method="post" action=action class="chat-form">
                <input type="text" name="text" placeholder="Type your message..." value=draft />
                <button type="submit">"Send"</button>
            </form>
        </section>
    }
}

#[component]
fn DetailScreen(session: DetailSession) -> impl IntoView {
    let base = session_path(&session);
    let upload_url = format!("/api/sessions/{}/files", session.id);
    let claim = session.claim;

    view! {
        <Layout with_upload_script=true>
            <nav class="topbar">
                <div>
                    <h1>{TITLE}</h1>
                    <p class="claim-id">{format!("Claim ID: {}", claim.claim_id)}</p>
                </div>
                <form method="post" action=format!("{base}/logout")>
                    <button type="submit">"Logout"</button>
                </form>
            </nav>
            <main class="detail" data-routed-id=session.routed_id>
                <p class="headline">{claim.headline()}</p>
                <div class="grid">
                    <DeviceDetails claim=claim.clone() />
                    <ActionsPanel
                        claim=claim.clone()
                        files=session.attachments.files().to_vec()
                        upload_url=upload_url
                    />
                    <ChatPanel
                        status=claim.status
                        messages=session.chat.messages().to_vec()
                        draft=session.chat.draft().to_string()
                        action=format!("{base}/messages")
                    />
                </div>
            </main>
        </Layout>
    }
}

pub fn lookup_page(form: &LookupForm) -> String {
    let form = form.clone();
    render_document(move || view! { <LookupScreen form=form /> })
}

pub fn not_found_page(routed_id: &str) -> String {
    let routed_id = routed_id.to_string();
    render_document(move || view! { <NotFoundScreen routed_id=routed_id /> })
}

pub fn error_page(message: &str) -> String {
    let message = message.to_string();
    render_document(move || view! { <ErrorScreen message=message /> })
}

pub fn detail_page(session: &DetailSession) -> String {
    let session = session.clone();
    render_document(move || view! { <DetailScreen session=session /> })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim_flow::{FileDescriptor, StaticClaimDataset, detail};

    fn session() -> DetailSession {
        let dataset = StaticClaimDataset::bundled().unwrap();
        detail::mount(&dataset, "abc123").into_session().unwrap()
    }

    #[test]
    fn test_lookup_page_errors() {
        let page = lookup_page(&LookupForm::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(!page.contains("Claim ID is required"));
        assert!(!page.contains("role=\"alert\""));

        let mut form = LookupForm::with_input("");
        form.error = Some(LookupFailure::Required);
        assert!(lookup_page(&form).contains("Claim ID is required"));

        let mut form = LookupForm::with_input("ZZZ999");
        form.error = Some(LookupFailure::InvalidClaimId);
        let page = lookup_page(&form);
        assert!(page.contains("Invalid Claim ID"));
        assert!(page.contains(r#"value="ZZZ999""#));
    }

    #[test]
    fn test_not_found_page_has_no_actions() {
        let page = not_found_page("nonexistent");
        assert!(page.contains("Claim not found"));
        assert!(page.contains(r#"data-routed-id="nonexistent""#));
        assert!(!page.contains("<form"));
        assert!(!page.contains("fileUpload"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = error_page("<b>boom</b>");
        assert!(page.contains("&lt;b&gt;boom&lt;/b&gt;"));
        assert!(!page.contains("<b>boom"));
    }

    #[test]
    fn test_detail_page_shows_canonical_id_and_seed_chat() {
        let session = session();
        let page = detail_page(&session);
        assert!(page.contains("Claim ID: ABC123"));
        assert!(page.contains(r#"data-routed-id="abc123""#));
        assert!(page.contains("Hello, please upload your supporting documents."));
        assert!(page.contains("No document uploaded"));
        assert!(page.contains(&format!("/home/abc123/{}/logout", session.id)));
        assert!(page.contains(&format!(r#"data-upload-url="/api/sessions/{}/files""#, session.id)));
        assert!(page.contains("/assets/upload.js"));
    }

    #[test]
    fn test_detail_page_lists_files_and_escapes_text() {
        let mut session = session();
        session.send_message("<script>alert(1)</script>");
        session.attach_files(vec![FileDescriptor::new("photo.jpg", 12_800)]);

        let page = detail_page(&session);
        assert!(page.contains("📄 photo.jpg (12.50 KB)"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("No document uploaded"));
    }
}
