//! Page navigation and HTML rendering
//!
//! A selected [`Page`] is turned into a [`View`] carrying exactly the data
//! that page shows, and the view is rendered to a complete HTML document.
//! Rendering is pure: the same view always produces the same markup.

use crate::data::{FeatureVector, FEATURE_NAMES};
use crate::predict::Prediction;
use crate::segments::{
    ClusterSummary, DatasetColumn, ElbowPoint, CLUSTER_SUMMARIES, DATASET_COLUMNS, DATASET_ROWS,
    ELBOW_CURVE,
};
use std::fmt::Write;

pub const APP_TITLE: &str = "Customer Segmentation Using K-Means Clustering";

/// Sidebar menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    About,
    Dataset,
    ClusteringInterpretation,
    Predict,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Dataset,
        Page::ClusteringInterpretation,
        Page::Predict,
    ];

    /// URL key used in `?page=`
    pub fn key(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Dataset => "dataset",
            Page::ClusteringInterpretation => "clustering-interpretation",
            Page::Predict => "predict",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Dataset => "Dataset",
            Page::ClusteringInterpretation => "Clustering Interpretation",
            Page::Predict => "Predict",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.key() == key)
    }
}

/// Raw form field values, echoed back into the form after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub yearly_avg_views: String,
    pub yearly_avg_checkins: String,
    pub daily_avg_minutes: String,
}

impl Default for FormValues {
    fn default() -> Self {
        let defaults = FeatureVector::default();
        Self {
            yearly_avg_views: format_number(defaults.yearly_avg_views),
            yearly_avg_checkins: format_number(defaults.yearly_avg_checkins),
            daily_avg_minutes: format_number(defaults.daily_avg_minutes),
        }
    }
}

/// Result area under the prediction form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PredictOutcome {
    #[default]
    Pending,
    Predicted(Prediction),
    Rejected(String),
}

/// A page together with the data it renders
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Home,
    About,
    Dataset {
        rows: usize,
        columns: &'static [DatasetColumn],
    },
    ClusteringInterpretation {
        summaries: &'static [ClusterSummary],
        elbow: &'static [ElbowPoint],
        chart_svg: Option<&'a str>,
    },
    Predict {
        values: FormValues,
        outcome: PredictOutcome,
    },
    NotFound {
        requested: String,
    },
}

impl View<'_> {
    /// Sidebar entry highlighted for this view
    pub fn page(&self) -> Option<Page> {
        match self {
            View::Home => Some(Page::Home),
            View::About => Some(Page::About),
            View::Dataset { .. } => Some(Page::Dataset),
            View::ClusteringInterpretation { .. } => Some(Page::ClusteringInterpretation),
            View::Predict { .. } => Some(Page::Predict),
            View::NotFound { .. } => None,
        }
    }
}

/// Stateless page controller. Holds only the pre-rendered elbow chart.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    chart_svg: Option<String>,
}

impl Navigator {
    pub fn new(chart_svg: Option<String>) -> Self {
        Self { chart_svg }
    }

    /// View for a freshly selected page
    pub fn view(&self, page: Page) -> View<'_> {
        match page {
            Page::Home => View::Home,
            Page::About => View::About,
            Page::Dataset => View::Dataset {
                rows: DATASET_ROWS,
                columns: &DATASET_COLUMNS,
            },
            Page::ClusteringInterpretation => View::ClusteringInterpretation {
                summaries: &CLUSTER_SUMMARIES,
                elbow: &ELBOW_CURVE,
                chart_svg: self.chart_svg.as_deref(),
            },
            Page::Predict => View::Predict {
                values: FormValues::default(),
                outcome: PredictOutcome::Pending,
            },
        }
    }

    /// View for a URL key; unknown keys yield a not-found view
    pub fn view_for_key(&self, key: &str) -> View<'_> {
        match Page::from_key(key) {
            Some(page) => self.view(page),
            None => View::NotFound {
                requested: key.to_string(),
            },
        }
    }

    pub fn render_page(&self, page: Page) -> String {
        render(&self.view(page))
    }
}

/// Render a view into a full HTML document
pub fn render(view: &View<'_>) -> String {
    let mut html = String::new();
    let heading = view.page().map_or("Page not found", Page::title);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - {}</title>\n</head>\n<body>\n",
        heading, APP_TITLE
    );
    render_sidebar(&mut html, view.page());
    let _ = write!(html, "<main>\n<h1>{}</h1>\n<h2>{}</h2>\n", APP_TITLE, heading);

    match view {
        View::Home => render_home(&mut html),
        View::About => render_about(&mut html),
        View::Dataset { rows, columns } => render_dataset(&mut html, *rows, columns),
        View::ClusteringInterpretation {
            summaries,
            elbow,
            chart_svg,
        } => render_interpretation(&mut html, summaries, elbow, *chart_svg),
        View::Predict { values, outcome } => render_predict(&mut html, values, outcome),
        View::NotFound { requested } => {
            let _ = writeln!(
                html,
                "<p>No page named <code>{}</code>. Pick one from the menu.</p>",
                escape_html(requested)
            );
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, active: Option<Page>) {
    html.push_str("<nav class=\"sidebar\">\n<h3>Navigation</h3>\n<ul>\n");
    for page in Page::ALL {
        let class = if Some(page) == active {
            " class=\"active\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<li><a href=\"/?page={}\"{}>{}</a></li>",
            page.key(),
            class,
            page.title()
        );
    }
    html.push_str("</ul>\n</nav>\n");
}

fn render_home(html: &mut String) {
    html.push_str(
        "<p>Welcome! This app groups travel-platform customers into behavioural segments \
         using a K-Means model trained on their browsing and check-in history.</p>\n\
         <p>Use the menu to learn about the dataset, see how the clusters were chosen \
         and interpreted, or predict the segment of a new customer.</p>\n",
    );
}

fn render_about(html: &mut String) {
    html.push_str(
        "<p>Customer segmentation divides a customer base into groups that behave alike, \
         so that marketing and product decisions can be tailored to each group.</p>\n\
         <p>Each customer is described by three features. They are standardized with a \
         scaler fitted on the training data and assigned to the nearest of three K-Means \
         centroids.</p>\n<ul>\n",
    );
    for name in FEATURE_NAMES {
        let _ = writeln!(html, "<li>{}</li>", name);
    }
    html.push_str("</ul>\n");
}

fn render_dataset(html: &mut String, rows: usize, columns: &[DatasetColumn]) {
    let _ = writeln!(
        html,
        "<p>The training data contains {} customers of a travel booking platform.</p>",
        rows
    );
    html.push_str("<table>\n<tr><th>Column</th><th>Description</th></tr>\n");
    for column in columns {
        let _ = writeln!(
            html,
            "<tr><td><code>{}</code></td><td>{}</td></tr>",
            column.name, column.description
        );
    }
    html.push_str("</table>\n");
}

fn render_interpretation(
    html: &mut String,
    summaries: &[ClusterSummary],
    elbow: &[ElbowPoint],
    chart_svg: Option<&str>,
) {
    html.push_str("<h3>Elbow Method</h3>\n");
    match chart_svg {
        Some(svg) => {
            html.push_str("<figure class=\"elbow-chart\">\n");
            html.push_str(svg);
            html.push_str("\n</figure>\n");
        }
        None => html.push_str("<p><em>Chart unavailable.</em></p>\n"),
    }
    html.push_str("<table class=\"elbow\">\n<tr><th>K</th><th>Inertia</th></tr>\n");
    for point in elbow {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{:.1}</td></tr>",
            point.k, point.inertia
        );
    }
    html.push_str(
        "</table>\n<p>The curve flattens after K = 3, so three clusters were kept.</p>\n",
    );

    html.push_str(
        "<h3>Cluster Summary</h3>\n<table class=\"clusters\">\n<tr><th>Cluster</th>\
         <th>Segment</th><th>Customers</th><th>Avg. yearly views</th>\
         <th>Avg. yearly check-ins</th><th>Avg. daily minutes</th></tr>\n",
    );
    for summary in summaries {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>",
            summary.cluster_id,
            summary.label,
            summary.customers,
            summary.avg_views,
            summary.avg_checkins,
            summary.avg_minutes
        );
    }
    html.push_str("</table>\n");
}

fn render_predict(html: &mut String, values: &FormValues, outcome: &PredictOutcome) {
    html.push_str("<h3>Enter Customer Data</h3>\n<form method=\"post\" action=\"/predict\">\n");
    let fields = [
        ("yearly_avg_views", FEATURE_NAMES[0], &values.yearly_avg_views),
        ("yearly_avg_checkins", FEATURE_NAMES[1], &values.yearly_avg_checkins),
        ("daily_avg_minutes", FEATURE_NAMES[2], &values.daily_avg_minutes),
    ];
    for (name, label, value) in fields {
        let _ = writeln!(
            html,
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"0\" step=\"any\" value=\"{}\">",
            escape_html(value)
        );
    }
    html.push_str("<button type=\"submit\">Get Customer Segmentation</button>\n</form>\n");

    match outcome {
        PredictOutcome::Pending => {}
        PredictOutcome::Predicted(prediction) => {
            let _ = writeln!(
                html,
                "<section class=\"result\">\n<p><strong>{}</strong></p>\n<p>{}</p>\n</section>",
                prediction.headline(),
                escape_html(prediction.description)
            );
        }
        PredictOutcome::Rejected(message) => {
            let _ = writeln!(
                html,
                "<p class=\"error\">{}</p>",
                escape_html(message)
            );
        }
    }
}

/// Format a form default without a trailing `.0`
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::describe;

    #[test]
    fn test_page_keys_roundtrip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("settings"), None);
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_every_page_renders_with_sidebar() {
        let navigator = Navigator::default();
        for page in Page::ALL {
            let html = navigator.render_page(page);
            assert!(html.contains(APP_TITLE));
            for entry in Page::ALL {
                assert!(html.contains(&format!("href=\"/?page={}\"", entry.key())));
            }
            assert!(html.contains(&format!(
                "<a href=\"/?page={}\" class=\"active\">",
                page.key()
            )));
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let navigator = Navigator::new(Some("<svg></svg>".to_string()));
        for page in Page::ALL {
            assert_eq!(navigator.render_page(page), navigator.render_page(page));
        }
    }

    #[test]
    fn test_predict_form_defaults() {
        let html = Navigator::default().render_page(Page::Predict);
        assert!(html.contains("name=\"yearly_avg_views\" min=\"0\" step=\"any\" value=\"300\""));
        assert!(html.contains("name=\"yearly_avg_checkins\" min=\"0\" step=\"any\" value=\"5\""));
        assert!(html.contains("name=\"daily_avg_minutes\" min=\"0\" step=\"any\" value=\"30\""));
        assert!(!html.contains("Predicted Segment"));
    }

    #[test]
    fn test_interpretation_without_chart_still_lists_curve() {
        let html = Navigator::default().render_page(Page::ClusteringInterpretation);
        assert!(html.contains("Chart unavailable"));
        assert!(html.contains("<tr><td>3</td><td>12417.3</td></tr>"));
        assert!(html.contains("Occasional Travelers"));
    }

    #[test]
    fn test_interpretation_inlines_chart() {
        let navigator = Navigator::new(Some("<svg id=\"elbow\"></svg>".to_string()));
        let html = navigator.render_page(Page::ClusteringInterpretation);
        assert!(html.contains("<svg id=\"elbow\"></svg>"));
        assert!(!html.contains("Chart unavailable"));
    }

    #[test]
    fn test_predicted_and_rejected_outcomes() {
        let prediction = Prediction {
            cluster_id: 1,
            description: describe(1),
        };
        let html = render(&View::Predict {
            values: FormValues::default(),
            outcome: PredictOutcome::Predicted(prediction),
        });
        assert!(html.contains("Predicted Segment (Cluster): 1"));
        assert!(html.contains("Occasional Travelers"));

        let html = render(&View::Predict {
            values: FormValues {
                yearly_avg_views: "\"><script>".to_string(),
                ..FormValues::default()
            },
            outcome: PredictOutcome::Rejected("must be <non-negative>".to_string()),
        });
        assert!(html.contains("must be &lt;non-negative&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unknown_key_renders_not_found() {
        let navigator = Navigator::default();
        let view = navigator.view_for_key("<admin>");
        assert_eq!(view.page(), None);
        let html = render(&view);
        assert!(html.contains("Page not found"));
        assert!(html.contains("&lt;admin&gt;"));
        assert!(!html.contains("class=\"active\""));
    }
}
