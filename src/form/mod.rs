/// Photo search form and its results grid
use crate::api::DashboardClient;
use crate::domain::{Camera, PhotoRecord, QueryConditions};
use crate::errors::ApiResult;
use crate::view::{Element, Node};
use tracing::{info, warn};

/// Raw values of the three optional search fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub camera: Option<String>,
    pub sol: Option<String>,
    pub earth_date: Option<String>,
}

/// A click on one rover's submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub button_id: String,
    pub input: FormInput,
}

impl Submission {
    /// Rover name is whatever follows the first `-` of the button id
    pub fn rover_name(&self) -> Option<&str> {
        rover_from_button_id(&self.button_id)
    }

    pub fn conditions(&self) -> Option<QueryConditions> {
        self.rover_name()
            .map(|rover| query_conditions(rover, &self.input))
    }
}

pub fn rover_from_button_id(button_id: &str) -> Option<&str> {
    button_id
        .split_once('-')
        .map(|(_, rover)| rover)
        .filter(|rover| !rover.is_empty())
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Query conditions from the non-empty fields: earth date, sol, camera
pub fn query_conditions(rover_name: &str, input: &FormInput) -> QueryConditions {
    let mut conditions = QueryConditions::new(rover_name);
    if let Some(earth_date) = filled(&input.earth_date) {
        conditions = conditions.with_earth_date(earth_date);
    }
    if let Some(sol) = filled(&input.sol) {
        conditions = conditions.with_sol(sol);
    }
    if let Some(camera) = filled(&input.camera) {
        conditions = conditions.with_camera(camera);
    }
    conditions
}

/// What the results grid of one rover currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResults {
    #[default]
    Idle,
    Photos(Vec<PhotoRecord>),
    Nothing,
    Failed(String),
}

impl SearchResults {
    pub fn from_result(result: ApiResult<Vec<PhotoRecord>>) -> Self {
        match result {
            Ok(photos) if photos.is_empty() => SearchResults::Nothing,
            Ok(photos) => SearchResults::Photos(photos),
            Err(e) => SearchResults::Failed(e.message()),
        }
    }

    /// Drop previous results
    pub fn reset(&mut self) {
        *self = SearchResults::Idle;
    }
}

/// Run a submission against the proxy, replacing `results`
pub async fn submit_form(
    client: &DashboardClient,
    submission: &Submission,
    results: &mut SearchResults,
) {
    results.reset();
    let Some(conditions) = submission.conditions() else {
        warn!("Ignoring submission from button {:?}", submission.button_id);
        return;
    };
    info!("Querying photos: {}", conditions.to_query_string());
    *results = SearchResults::from_result(client.query_photos(&conditions).await);
}

fn field_row(label: &str, control: Element, for_id: &str) -> Element {
    Element::new("div")
        .class("inputdiv")
        .child(Element::new("label").attr("for", for_id).text(label))
        .child(control)
        .child(Element::new("br"))
}

/// Search form for `rover_name`, prefilled with the last submitted input
pub fn input_form(rover_name: &str, rover_tab: &str, input: Option<&FormInput>) -> Node {
    let empty = FormInput::default();
    let input = input.unwrap_or(&empty);
    let camera_id = format!("camera-{}", rover_name);
    let sol_id = format!("sol-{}", rover_name);
    let date_id = format!("earthDate-{}", rover_name);
    let btn_id = format!("btn-{}", rover_name);

    let selected = filled(&input.camera);
    let options = std::iter::once(Element::new("option").attr("value", ""))
        .chain(Camera::ALL.iter().map(|camera| {
            let option = Element::new("option")
                .attr("value", camera.as_str())
                .text(camera.as_str());
            if selected == Some(camera.as_str()) {
                option.attr("selected", "selected")
            } else {
                option
            }
        }));
    let select = Element::new("select")
        .id(camera_id.clone())
        .attr("name", "camera")
        .children(options);

    let sol = Element::new("input")
        .attr("type", "text")
        .id(sol_id.clone())
        .attr("name", "sol")
        .attr("value", filled(&input.sol).unwrap_or_default());

    let earth_date = Element::new("input")
        .attr("type", "date")
        .id(date_id.clone())
        .attr("name", "earthDate")
        .attr("value", filled(&input.earth_date).unwrap_or_default());

    let fieldset = Element::new("fieldset")
        .child(Element::new("legend").text("Search Photo:"))
        .child(field_row("Camera:", select, &camera_id))
        .child(field_row("Sol:", sol, &sol_id))
        .child(field_row("Earth Date:", earth_date, &date_id))
        .child(
            Element::new("button")
                .class("btn")
                .id(btn_id.clone())
                .attr("type", "submit")
                .attr("name", "submit")
                .attr("value", btn_id)
                .text("Submit"),
        );

    let form = Element::new("form")
        .id(format!("form-{}", rover_name))
        .attr("method", "get")
        .attr("action", "/")
        .child(hidden("tab", "rovers"))
        .child(hidden("rover", rover_tab))
        .child(fieldset);

    Element::new("div").class("searchboard").child(form).into()
}

fn hidden(name: &str, value: &str) -> Element {
    Element::new("input")
        .attr("type", "hidden")
        .attr("name", name.to_string())
        .attr("value", value)
}

fn message(text: String) -> Node {
    Element::new("div")
        .child(Element::new("p").text(text))
        .into()
}

fn photo_item(photo: &PhotoRecord) -> Node {
    Element::new("div")
        .class("photo-item")
        .child(Element::new("img").attr("src", photo.src.clone()))
        .child(
            Element::new("div")
                .child(Element::new("p").text(format!("Sol: {}", photo.sol)))
                .child(Element::new("p").text(format!("Camera: {}", photo.camera)))
                .child(Element::new("p").text(format!("Earth Date: {}", photo.earth_date))),
        )
        .into()
}

/// Results container of one rover
pub fn photos_container(rover_name: &str, results: &SearchResults) -> Node {
    let items: Vec<Node> = match results {
        SearchResults::Idle => Vec::new(),
        SearchResults::Photos(photos) => photos.iter().map(photo_item).collect(),
        SearchResults::Nothing => vec![message(
            "Sorry, looks like nothing has been found !".to_string(),
        )],
        SearchResults::Failed(msg) => vec![message(format!("API Error : {}", msg))],
    };

    Element::new("div")
        .child(Element::new("p").class("subtitle").text("Search Results:"))
        .child(
            Element::new("div")
                .class("photos")
                .id(format!("photos-{}", rover_name))
                .children(items),
        )
        .into()
}
