//! Elbow-method chart rendered with Plotters

use crate::segments::ElbowPoint;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (640, 400);

/// Render the elbow curve as an SVG document
///
/// # Arguments
/// * `curve` - Inertia per number of clusters, ordered by K
///
/// # Returns
/// * SVG markup suitable for inlining into a page
pub fn render_elbow_chart(curve: &[ElbowPoint]) -> crate::Result<String> {
    if curve.is_empty() {
        anyhow::bail!("Elbow curve has no points");
    }

    let k_min = curve.iter().map(|p| p.k).min().unwrap_or(1) as f64;
    let k_max = curve.iter().map(|p| p.k).max().unwrap_or(1) as f64;
    let inertia_max = curve.iter().fold(0.0_f64, |acc, p| acc.max(p.inertia));

    let points: Vec<(f64, f64)> = curve.iter().map(|p| (p.k as f64, p.inertia)).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Elbow Method for Optimal K", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((k_min - 0.5)..(k_max + 0.5), 0f64..(inertia_max * 1.1))?;

        chart
            .configure_mesh()
            .x_desc("Number of clusters (K)")
            .y_desc("Inertia")
            .x_labels(curve.len())
            .x_label_formatter(&|k| format!("{:.0}", k))
            .axis_desc_style(("sans-serif", 15))
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, BLUE.filled())),
        )?;

        root.present()?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::ELBOW_CURVE;

    #[test]
    fn test_render_elbow_chart() {
        let svg = render_elbow_chart(&ELBOW_CURVE).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Elbow Method for Optimal K"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_empty_curve_is_rejected() {
        assert!(render_elbow_chart(&[]).is_err());
    }
}
