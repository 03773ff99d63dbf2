/// Dashboard page orchestration: fetch through the proxy, then build the view tree
use crate::api::DashboardClient;
use crate::domain::{ApodRecord, ManifestField, ManifestSummary, Rover, RoverStore};
use crate::errors::{ApiError, ApiResult};
use crate::form::{input_form, photos_container, submit_form, FormInput, SearchResults, Submission};
use crate::tabs::{Tab, TabGroup};
use crate::utils::{display_value, is_truthy};
use crate::view::{Element, Node};
use chrono::Local;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

pub const LAYOUT_BUTTON: &str = "layoutButton";
pub const TAB_BUTTON: &str = "tabButton";

/// Formatters the page is rendered with
#[derive(Clone, Copy)]
pub struct Templates {
    pub apod_video: fn(&ApodRecord) -> Vec<Node>,
    pub apod_image: fn(&ApodRecord) -> Vec<Node>,
    pub apod_error: fn(&ApiError) -> Vec<Node>,
    pub manifest_value: fn(ManifestField, &Value) -> String,
    pub manifest_missing: fn(ManifestField) -> String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            apod_video: video_apod,
            apod_image: image_apod,
            apod_error: error_nodes,
            manifest_value: manifest_value_text,
            manifest_missing: manifest_missing_text,
        }
    }
}

/// Tab selection and pending search of one page request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub tab: Option<String>,
    pub rover: Option<String>,
    pub submission: Option<Submission>,
}

/// Everything shown inside one rover's tab
#[derive(Debug, Clone)]
pub struct RoverView {
    pub rover: Rover,
    pub manifest: ApiResult<ManifestSummary>,
    pub input: Option<FormInput>,
    pub results: SearchResults,
}

pub struct Dashboard {
    client: Arc<DashboardClient>,
    store: RoverStore,
    templates: Templates,
}

impl Dashboard {
    pub fn new(client: Arc<DashboardClient>, store: RoverStore) -> Self {
        Self {
            client,
            store,
            templates: Templates::default(),
        }
    }

    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = templates;
        self
    }

    pub fn store(&self) -> &RoverStore {
        &self.store
    }

    /// Fetch both panels and assemble the page
    pub async fn render(&self, ui: &UiState) -> Node {
        info!("Rendering dashboard (tab={:?}, rover={:?})", ui.tab, ui.rover);
        let (apod, rovers) = tokio::join!(self.client.get_image_of_the_day(), self.rover_views(ui));
        if let Err(e) = &apod {
            error!("APOD panel error: {}", e);
        }
        self.page(ui, &apod, &rovers)
    }

    async fn rover_views(&self, ui: &UiState) -> Vec<RoverView> {
        join_all(self.store.rovers.iter().map(|rover| self.rover_view(rover, ui))).await
    }

    async fn rover_view(&self, rover: &Rover, ui: &UiState) -> RoverView {
        let submission = ui.submission.as_ref().filter(|s| {
            s.rover_name()
                .map(|name| name.eq_ignore_ascii_case(rover.name))
                .unwrap_or(false)
        });

        let search = async {
            let mut results = SearchResults::default();
            if let Some(submission) = submission {
                submit_form(&self.client, submission, &mut results).await;
            }
            results
        };
        let (manifest, results) = tokio::join!(self.client.get_rover_info(rover.name), search);
        if let Err(e) = &manifest {
            error!("Manifest error for {}: {}", rover.name, e);
        }

        RoverView {
            rover: rover.clone(),
            manifest,
            input: submission.map(|s| s.input.clone()),
            results,
        }
    }

    pub fn layout_tabs(&self, ui: &UiState) -> TabGroup {
        TabGroup::new(
            LAYOUT_BUTTON,
            vec![Tab::new("apod", "Apod"), Tab::new("rovers", "Rovers")],
        )
        .select(ui.tab.as_deref())
    }

    pub fn rover_tabs(&self, ui: &UiState) -> TabGroup {
        let tabs = self
            .store
            .rovers
            .iter()
            .map(|r| Tab::new(rover_tab_id(r), r.name))
            .collect();
        TabGroup::new(TAB_BUTTON, tabs).select(ui.rover.as_deref())
    }

    /// Assemble the page from already fetched panel data
    pub fn page(&self, ui: &UiState, apod: &ApiResult<ApodRecord>, rovers: &[RoverView]) -> Node {
        let layout = self.layout_tabs(ui);
        let rover_tabs = self.rover_tabs(ui);
        let active_rover = rover_tabs.active_id().to_string();

        let apod_panel = layout.panel("apod", apod_content(&self.templates, apod));

        let rover_panels = rovers.iter().map(|view| {
            let tab_id = rover_tab_id(&view.rover);
            rover_tabs.panel(&tab_id, self.rover_content(view, &tab_id))
        });

        let rovers_panel = layout.panel(
            "rovers",
            [
                Node::from(Element::new("h2").class("title").text("Rovers Dashboard")),
                Element::new("p").class("subtitle").text("Instruction").into(),
                Element::new("p")
                    .class("text")
                    .text("Click the tab in below to show corresponding rover information with interactive search")
                    .into(),
                Element::new("div")
                    .class("tabs")
                    .child(rover_tabs.buttons(|t| format!("/?tab=rovers&rover={}", t.id)))
                    .into(),
            ]
            .into_iter()
            .chain(rover_panels),
        );

        Element::new("div")
            .class("app")
            .child(
                Element::new("div")
                    .class("header")
                    .child(Element::new("header").text(greeting(&self.store.user_name))),
            )
            .child(
                Element::new("div").class("layout").child(
                    Element::new("div")
                        .class("layouts")
                        .child(layout.buttons(|t| {
                            format!("/?tab={}&rover={}", t.id, active_rover)
                        }))
                        .child(apod_panel)
                        .child(rovers_panel),
                ),
            )
            .child(Element::new("footer").text("OpenSource contributor"))
            .into()
    }

    fn rover_content(&self, view: &RoverView, tab_id: &str) -> Vec<Node> {
        let mut intro = Element::new("div")
            .class("intro")
            .child(Element::new("p").text(view.rover.description));
        if let Some(image) = view.rover.image {
            intro = intro.child(Element::new("img").attr("src", format!("/assets/{}", image)));
        }

        vec![
            intro.into(),
            manifest_panel(&self.templates, &view.manifest),
            input_form(view.rover.name, tab_id, view.input.as_ref()),
            photos_container(view.rover.name, &view.results),
        ]
    }
}

pub fn rover_tab_id(rover: &Rover) -> String {
    rover.name.to_lowercase()
}

pub fn greeting(name: &str) -> String {
    let today = Local::now().format("%A, %B %-d, %Y");
    if name.is_empty() {
        format!("Hello! Today is {}", today)
    } else {
        format!("Welcome, {}! Today is {}", name, today)
    }
}

/// APOD panel body: video or image template, or the error template
pub fn apod_content(templates: &Templates, apod: &ApiResult<ApodRecord>) -> Vec<Node> {
    match apod {
        Ok(record) if record.is_video() => (templates.apod_video)(record),
        Ok(record) => (templates.apod_image)(record),
        Err(e) => (templates.apod_error)(e),
    }
}

pub fn video_apod(apod: &ApodRecord) -> Vec<Node> {
    vec![
        Element::new("p")
            .class("subtitle")
            .text("See today's featured video")
            .into(),
        Element::new("iframe")
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("src", apod.url.clone())
            .into(),
        Element::new("div")
            .class("desc")
            .child(Element::new("p").class("subtitle").text(apod.title.clone()))
            .child(Element::new("p").class("text").text(apod.explanation.clone()))
            .into(),
    ]
}

pub fn image_apod(apod: &ApodRecord) -> Vec<Node> {
    let mut desc = Element::new("div")
        .class("apodContent")
        .child(Element::new("p").class("subtitle").text(apod.title.clone()))
        .child(Element::new("p").class("text").text(apod.explanation.clone()));
    if let Some(copyright) = &apod.copyright {
        desc = desc.child(
            Element::new("p")
                .class("copyright")
                .text(format!("\u{a9} {}", copyright.trim())),
        );
    }

    vec![
        Element::new("div")
            .class("apodContent")
            .child(
                Element::new("a")
                    .attr("target", "_blank")
                    .attr("href", apod.url.clone())
                    .child(
                        Element::new("img")
                            .attr("src", apod.url.clone())
                            .attr("height", "50%")
                            .attr("width", "auto"),
                    ),
            )
            .into(),
        desc.into(),
    ]
}

pub fn error_nodes(err: &ApiError) -> Vec<Node> {
    vec![error_node(err)]
}

pub fn error_node(err: &ApiError) -> Node {
    Element::new("div").class("error").text(err.message()).into()
}

pub fn manifest_value_text(field: ManifestField, value: &Value) -> String {
    format!("{} : {}", field, display_value(value))
}

pub fn manifest_missing_text(field: ManifestField) -> String {
    format!("Sorry, can not find value of {} from manifest API", field)
}

/// One row per manifest field, or a single error node when the fetch failed
pub fn manifest_panel(templates: &Templates, manifest: &ApiResult<ManifestSummary>) -> Node {
    let panel = Element::new("div").class("manifest");
    match manifest {
        Ok(summary) => panel
            .children(ManifestField::ALL.iter().map(|&field| {
                let text = match summary.get(field).filter(|v| is_truthy(v)) {
                    Some(value) => (templates.manifest_value)(field, value),
                    None => (templates.manifest_missing)(field),
                };
                Element::new("p").text(text)
            }))
            .into(),
        Err(e) => panel.child(error_node(e)).into(),
    }
}
