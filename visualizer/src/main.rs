use aircore::prelude::{
    cluster_layout, AggregateStats, GeoProjection, JitterSource, Measurement, QualityLevel,
    SceneParameters, SeededJitter, WeatherReport,
};
use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task,
    Theme,
};
use serde::Deserialize;
use std::time::Duration;

const BRIDGE_URL: &str = "http://127.0.0.1:9400";

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Calidad del Aire - España".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(60)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

/// Wire shape of the collector's `GET /snapshot` reply.
#[derive(Debug, Clone, Deserialize, Default)]
struct Snapshot {
    #[serde(default)]
    measurements: Vec<Measurement>,
    #[serde(default)]
    stats: AggregateStats,
    #[serde(default)]
    demo_mode: bool,
    #[serde(default)]
    last_update: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QualityBucket {
    All,
    Good,
    Moderate,
    Poor,
}

impl QualityBucket {
    fn matches(&self, aqi: i32) -> bool {
        match self {
            QualityBucket::All => true,
            QualityBucket::Good => aqi <= 2,
            QualityBucket::Moderate => aqi == 3,
            QualityBucket::Poor => aqi >= 4,
        }
    }
}

#[derive(Debug)]
struct Visualizer {
    snapshot: Option<Snapshot>,
    selected_city: Option<String>,
    weather: Option<WeatherReport>,
    search: String,
    bucket: QualityBucket,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    SnapshotFetched(Result<Snapshot, String>),
    RefreshRequested,
    RefreshSubmitted(Result<bool, String>),
    SearchChanged(String),
    BucketChanged(QualityBucket),
    CitySelected(String),
    WeatherFetched(Result<WeatherReport, String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                snapshot: None,
                selected_city: None,
                weather: None,
                search: String::new(),
                bucket: QualityBucket::All,
                status: "Esperando datos del colector...".into(),
            },
            Task::perform(fetch_snapshot(), Message::SnapshotFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_snapshot(), Message::SnapshotFetched),
            Message::SnapshotFetched(Ok(snapshot)) => {
                state.status = format!(
                    "{} ciudades | AQI medio {:.1} | {}",
                    snapshot.measurements.len(),
                    snapshot.stats.avg_aqi,
                    snapshot.last_update.as_deref().unwrap_or("sin fecha")
                );
                if state.selected_city.is_none() {
                    state.selected_city = snapshot.stats.worst_city.clone();
                }
                state.snapshot = Some(snapshot);
                Task::none()
            }
            Message::SnapshotFetched(Err(err)) => {
                state.status = format!("Sin conexión con el colector: {err}");
                Task::none()
            }
            Message::RefreshRequested => {
                Task::perform(post_refresh(), Message::RefreshSubmitted)
            }
            Message::RefreshSubmitted(Ok(started)) => {
                state.status = if started {
                    "Actualización solicitada".into()
                } else {
                    "Actualización ya en curso".into()
                };
                Task::perform(fetch_snapshot(), Message::SnapshotFetched)
            }
            Message::RefreshSubmitted(Err(err)) => {
                state.status = format!("Error al actualizar: {err}");
                Task::none()
            }
            Message::SearchChanged(term) => {
                state.search = term;
                Task::none()
            }
            Message::BucketChanged(bucket) => {
                state.bucket = bucket;
                Task::none()
            }
            Message::CitySelected(name) => {
                state.selected_city = Some(name.clone());
                state.weather = None;
                if let Some(m) = state.measurement_by_name(&name) {
                    let (lat, lon) = (m.location.latitude, m.location.longitude);
                    return Task::perform(
                        fetch_weather(lat, lon, name),
                        Message::WeatherFetched,
                    );
                }
                Task::none()
            }
            Message::WeatherFetched(Ok(report)) => {
                state.weather = Some(report);
                Task::none()
            }
            Message::WeatherFetched(Err(err)) => {
                state.status = format!("Meteorología no disponible: {err}");
                Task::none()
            }
        }
    }

    fn measurement_by_name(&self, name: &str) -> Option<&Measurement> {
        self.snapshot
            .as_ref()?
            .measurements
            .iter()
            .find(|m| m.location.name == name)
    }

    fn filtered(&self) -> Vec<&Measurement> {
        let needle = self.search.to_lowercase();
        self.snapshot
            .as_ref()
            .map(|snapshot| {
                snapshot
                    .measurements
                    .iter()
                    .filter(|m| self.bucket.matches(m.pollutants.aqi))
                    .filter(|m| {
                        needle.is_empty() || m.location.name.to_lowercase().contains(&needle)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let snapshot = state.snapshot.clone().unwrap_or_default();
        let filtered = state.filtered();

        let count_for = |bucket: QualityBucket| {
            snapshot
                .measurements
                .iter()
                .filter(|m| bucket.matches(m.pollutants.aqi))
                .count()
        };

        let filter_row = row![
            button(text(format!("Todas ({})", snapshot.measurements.len())).size(13))
                .on_press(Message::BucketChanged(QualityBucket::All))
                .padding(6),
            button(text(format!("Buena ({})", count_for(QualityBucket::Good))).size(13))
                .on_press(Message::BucketChanged(QualityBucket::Good))
                .padding(6),
            button(text(format!("Moderada ({})", count_for(QualityBucket::Moderate))).size(13))
                .on_press(Message::BucketChanged(QualityBucket::Moderate))
                .padding(6),
            button(text(format!("Mala ({})", count_for(QualityBucket::Poor))).size(13))
                .on_press(Message::BucketChanged(QualityBucket::Poor))
                .padding(6),
        ]
        .spacing(8);

        let city_rows = filtered.iter().fold(Column::new().spacing(2), |col, m| {
            col.push(
                button(
                    text(format!(
                        "{} | AQI {} | PM2.5 {:.1}",
                        m.location.name, m.pollutants.aqi, m.pollutants.pm25
                    ))
                    .size(12),
                )
                .on_press(Message::CitySelected(m.location.name.clone()))
                .padding(4),
            )
        });

        let mut side_column = column![
            text("Ciudades").size(26),
            text_input("Buscar ciudad...", &state.search)
                .on_input(Message::SearchChanged)
                .padding(6),
            filter_row,
            scrollable(city_rows).height(Length::Fixed(320.0)),
            button("Actualizar ahora")
                .on_press(Message::RefreshRequested)
                .padding(10),
            text(&state.status).size(14),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(340.0));

        if snapshot.demo_mode {
            side_column = side_column
                .push(text("Modo demo: mostrando datos sintéticos").size(13));
        }

        let map = Canvas::new(MapView {
            measurements: snapshot.measurements.clone(),
            selected: state.selected_city.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(340.0));

        let selected = state
            .selected_city
            .as_deref()
            .and_then(|name| state.measurement_by_name(name).cloned());

        let skyline_header = if let Some(m) = &selected {
            text(format!(
                "{} - {} (AQI {})",
                m.location.name,
                m.quality.description(),
                m.pollutants.aqi
            ))
            .size(16)
        } else {
            text("Selecciona una ciudad").size(16)
        };

        let skyline = Canvas::new(SkylineView {
            measurement: selected,
        })
        .width(Length::Fill)
        .height(Length::Fixed(220.0));

        let weather_line = if let Some(w) = &state.weather {
            text(format!(
                "{:.1} °C | humedad {:.0}% | viento {:.1} m/s | {}",
                w.temperature, w.humidity, w.wind_speed, w.description
            ))
            .size(13)
        } else {
            text("").size(13)
        };

        let stats_line = text(format!(
            "PM2.5 medio {:.1} | peor: {} | mejor: {}",
            snapshot.stats.avg_pm25,
            snapshot.stats.worst_city.as_deref().unwrap_or("n/a"),
            snapshot.stats.best_city.as_deref().unwrap_or("n/a"),
        ))
        .size(14);

        let main_column = column![
            text("Mapa de calidad del aire").size(26),
            map,
            stats_line,
            skyline_header,
            skyline,
            weather_line,
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![side_column, main_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}

async fn fetch_snapshot() -> Result<Snapshot, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/snapshot"))
        .await
        .map_err(|e| e.to_string())?;
    response.json::<Snapshot>().await.map_err(|e| e.to_string())
}

async fn post_refresh() -> Result<bool, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/refresh"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        let body: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(body["started"].as_bool().unwrap_or(false))
    } else {
        Err(format!("{}", response.status()))
    }
}

async fn fetch_weather(lat: f64, lon: f64, name: String) -> Result<WeatherReport, String> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{BRIDGE_URL}/weather"))
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("name", name),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<WeatherReport>()
        .await
        .map_err(|e| e.to_string())
}

fn level_color(level: QualityLevel) -> Color {
    let [r, g, b] = level.rgb();
    Color::from_rgb(r, g, b)
}

/// 2D map: every city as a colored marker at its projected position.
struct MapView {
    measurements: Vec<Measurement>,
    selected: Option<String>,
}

impl canvas::Program<Message> for MapView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.04, 0.05, 0.08),
        );

        if self.measurements.is_empty() {
            return vec![frame.into_geometry()];
        }

        let projection = GeoProjection::default();
        let positions: Vec<[f32; 3]> = self
            .measurements
            .iter()
            .map(|m| projection.scene_position(m.location.latitude, m.location.longitude))
            .collect();

        let min_x = positions.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
        let max_x = positions.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
        let min_z = positions.iter().map(|p| p[2]).fold(f32::INFINITY, f32::min);
        let max_z = positions.iter().map(|p| p[2]).fold(f32::NEG_INFINITY, f32::max);
        let span_x = (max_x - min_x).max(1.0);
        let span_z = (max_z - min_z).max(1.0);
        let margin = 24.0;

        for (measurement, position) in self.measurements.iter().zip(&positions) {
            let x = margin + (position[0] - min_x) / span_x * (bounds.width - 2.0 * margin);
            let y = margin + (position[2] - min_z) / span_z * (bounds.height - 2.0 * margin);

            // Mirror of the 2D map's marker sizing, scaled to canvas pixels.
            let marker_size =
                (measurement.pollutants.aqi as f32 * 10.0).clamp(20.0, 50.0) / 8.0;
            let center = Point::new(x, y);
            let marker = Path::new(|builder| builder.circle(center, marker_size));
            frame.fill(&marker, level_color(measurement.quality));

            if self.selected.as_deref() == Some(measurement.location.name.as_str()) {
                let halo = Path::new(|builder| builder.circle(center, marker_size + 4.0));
                frame.stroke(
                    &halo,
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgb(0.9, 0.9, 0.95)),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Stylized skyline for one city, built from the derived cluster layout.
struct SkylineView {
    measurement: Option<Measurement>,
}

impl canvas::Program<Message> for SkylineView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.02, 0.05),
        );

        let Some(measurement) = &self.measurement else {
            return vec![frame.into_geometry()];
        };

        let aqi = measurement.pollutants.aqi;
        let params = SceneParameters::derive(measurement);
        let base_color = level_color(measurement.quality);
        let color = Color {
            a: params.opacity,
            ..base_color
        };

        // Jitter seeded from the city name so the silhouette is stable
        // between frames but differs between cities.
        let seed = measurement
            .location
            .name
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut jitter = SeededJitter::new(seed);
        let layout = cluster_layout(aqi, &mut jitter);

        let ground = bounds.height - 20.0;
        let center_x = bounds.width / 2.0;
        let scale = 70.0;

        for building in &layout {
            let width = building.width * scale;
            let height = building.height * scale;
            let x = center_x + building.x * scale * 2.0 - width / 2.0;
            frame.fill_rectangle(
                Point::new(x, ground - height),
                Size::new(width, height),
                color,
            );
        }

        // Pollution particles above the skyline for moderate air and worse.
        for _ in 0..params.particle_count {
            let px = center_x + jitter.spread(bounds.width / 3.0);
            let py = ground - jitter.unit() * (params.height * scale + 40.0);
            let dot = Path::new(|builder| builder.circle(Point::new(px, py), 1.2));
            frame.fill(
                &dot,
                Color {
                    a: 0.6,
                    ..base_color
                },
            );
        }

        // Smoke puffs hugging the rooftops.
        for _ in 0..params.smoke_count {
            let px = center_x + jitter.spread(scale * 0.5);
            let py = ground - params.height * scale - jitter.unit() * 20.0;
            let puff = Path::new(|builder| builder.circle(Point::new(px, py), 3.0));
            frame.fill(
                &puff,
                Color {
                    a: 0.15,
                    ..Color::from_rgb(0.6, 0.6, 0.65)
                },
            );
        }

        let baseline = Path::new(|builder| {
            builder.move_to(Point::new(0.0, ground));
            builder.line_to(Point::new(bounds.width, ground));
        });
        frame.stroke(
            &baseline,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.3, 0.3, 0.35)),
        );

        vec![frame.into_geometry()]
    }
}
