use iced::widget::{button, column, container, image, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::PathBuf;
use std::process::ExitCode;

use apod_desktop::date::{resolve_apod_date, today};
use apod_desktop::preview::{load_preview_async, Preview};
use apod_desktop::{add_apod_to_cache, ApiConfig, ApodCache, ApodClient, CacheConfig, ImageFetcher};

/// What a finished background download reports back to the UI
#[derive(Debug, Clone)]
struct DownloadSummary {
    title: String,
    is_new: bool,
}

/// Main application state
struct ApodViewer {
    /// The image cache database
    cache: ApodCache,
    /// Passed to background downloads, which open their own connection
    api_config: ApiConfig,
    /// Titles shown in the dropdown
    titles: Vec<String>,
    selected: Option<String>,
    /// Path of the selected image, once resolved
    selected_path: Option<PathBuf>,
    explanation: String,
    preview: Option<image::Handle>,
    date_input: String,
    downloading: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    DateChanged(String),
    /// User clicked "Download Image"
    Download,
    /// Background download finished
    DownloadComplete(Result<DownloadSummary, String>),
    TitleSelected(String),
    PreviewLoaded(Result<Preview, String>),
    /// User clicked "Set as Desktop"
    SetDesktop,
    DesktopSet(Result<PathBuf, String>),
}

impl ApodViewer {
    fn new(cache: ApodCache, api_config: ApiConfig) -> (Self, Task<Message>) {
        let (titles, status) = match cache.list_titles() {
            Ok(titles) => {
                let status = format!("Ready. {} images in cache.", titles.len());
                (titles, status)
            }
            Err(e) => (Vec::new(), format!("❌ Could not read cache: {}", e)),
        };
        tracing::info!(images = titles.len(), "APOD viewer initialized");

        (
            ApodViewer {
                cache,
                api_config,
                titles,
                selected: None,
                selected_path: None,
                explanation: String::new(),
                preview: None,
                date_input: today().format("%Y-%m-%d").to_string(),
                downloading: false,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DateChanged(value) => {
                self.date_input = value;
                Task::none()
            }
            Message::Download => {
                if self.downloading {
                    return Task::none();
                }

                let date = match resolve_apod_date(Some(self.date_input.as_str()), today()) {
                    Ok(date) => date,
                    Err(e) => {
                        self.status = format!("❌ {}", e);
                        return Task::none();
                    }
                };

                self.downloading = true;
                self.status = format!("Downloading APOD for {}...", date);

                let cache_config = self.cache.config().clone();
                let api_config = self.api_config.clone();

                Task::perform(download_apod(cache_config, api_config, date), Message::DownloadComplete)
            }
            Message::DownloadComplete(result) => {
                self.downloading = false;
                match result {
                    Ok(summary) => {
                        self.status = if summary.is_new {
                            format!("✅ Added to cache: {}", summary.title)
                        } else {
                            format!("📦 Already in cache: {}", summary.title)
                        };
                        self.refresh_titles();
                        return self.select(summary.title);
                    }
                    Err(e) => self.status = format!("❌ {}", e),
                }
                Task::none()
            }
            Message::TitleSelected(title) => self.select(title),
            Message::PreviewLoaded(result) => {
                match result {
                    Ok(preview) => {
                        self.preview = Some(image::Handle::from_rgba(preview.width, preview.height, preview.rgba));
                    }
                    Err(e) => {
                        self.preview = None;
                        self.status = format!("❌ Could not load preview: {}", e);
                    }
                }
                Task::none()
            }
            Message::SetDesktop => {
                let Some(path) = self.selected_path.clone() else {
                    return Task::none();
                };
                self.status = "Setting desktop background...".to_string();
                Task::perform(set_desktop_async(path), Message::DesktopSet)
            }
            Message::DesktopSet(result) => {
                self.status = match result {
                    Ok(path) => format!("🖼️  Desktop background set to {}", path.display()),
                    Err(e) => format!("❌ {}", e),
                };
                Task::none()
            }
        }
    }

    fn refresh_titles(&mut self) {
        match self.cache.list_titles() {
            Ok(titles) => self.titles = titles,
            Err(e) => self.status = format!("❌ Could not read cache: {}", e),
        }
    }

    /// Show the cached image with this title and start loading its preview
    fn select(&mut self, title: String) -> Task<Message> {
        let record = self
            .cache
            .lookup_by_title(&title)
            .and_then(|id| match id {
                Some(id) => self.cache.get_by_id(id),
                None => Ok(None),
            });

        self.selected = Some(title);
        self.preview = None;

        match record {
            Ok(Some(record)) => {
                self.explanation = record.explanation;
                self.selected_path = Some(record.image_path.clone());
                Task::perform(load_preview_async(record.image_path), |result| {
                    Message::PreviewLoaded(result.map_err(|e| e.to_string()))
                })
            }
            Ok(None) => {
                self.selected_path = None;
                self.explanation.clear();
                Task::none()
            }
            Err(e) => {
                self.selected_path = None;
                self.status = format!("❌ {}", e);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let picture: Element<Message> = match &self.preview {
            Some(handle) => image(handle.clone()).width(Length::Fill).height(Length::Fill).into(),
            None => container(text("No image selected").size(16))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let explanation = scrollable(text(&self.explanation).size(14)).height(Length::Fixed(120.0));

        let cached = row![
            text("Select Image:"),
            pick_list(self.titles.as_slice(), self.selected.as_ref(), Message::TitleSelected)
                .placeholder("Select title")
                .width(Length::Fill),
            button("Set as Desktop")
                .on_press_maybe(self.selected_path.as_ref().map(|_| Message::SetDesktop))
                .padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let download = row![
            text("Select Date:"),
            text_input("YYYY-MM-DD", &self.date_input)
                .on_input(Message::DateChanged)
                .on_submit(Message::Download)
                .width(Length::Fixed(140.0)),
            button("Download Image")
                .on_press_maybe((!self.downloading).then_some(Message::Download))
                .padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content = column![
            container(picture).height(Length::FillPortion(3)),
            explanation,
            cached,
            download,
            text(&self.status).size(14),
        ]
        .spacing(15)
        .padding(20);

        container(content).width(Length::Fill).height(Length::Fill).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> ExitCode {
    apod_desktop::init_tracing();

    let (cache, api_config) = match open_cache() {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = iced::application("Astronomy Picture of the Day Viewer", ApodViewer::update, ApodViewer::view)
        .theme(ApodViewer::theme)
        .centered()
        .run_with(move || ApodViewer::new(cache, api_config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn open_cache() -> apod_desktop::Result<(ApodCache, ApiConfig)> {
    let cache = ApodCache::open(&CacheConfig::from_env()?)?;
    Ok((cache, ApiConfig::from_env()?))
}

/// Fetch and cache the APOD for `date` without blocking the UI.
///
/// rusqlite::Connection is not Send, so the blocking task opens its own
/// connection to the same database.
async fn download_apod(
    cache_config: CacheConfig,
    api_config: ApiConfig,
    date: chrono::NaiveDate,
) -> Result<DownloadSummary, String> {
    tokio::task::spawn_blocking(move || -> apod_desktop::Result<DownloadSummary> {
        let cache = ApodCache::open(&cache_config)?;
        let client = ApodClient::new(api_config)?;
        let fetcher = ImageFetcher::with_http(client.http().clone());

        let outcome = add_apod_to_cache(&cache, &client, &fetcher, date)?;
        let title = cache
            .get_by_id(outcome.id())?
            .map(|record| record.title)
            .unwrap_or_default();

        Ok(DownloadSummary {
            title,
            is_new: outcome.is_new(),
        })
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
    .map_err(|e| e.to_string())
}

async fn set_desktop_async(path: PathBuf) -> Result<PathBuf, String> {
    tokio::task::spawn_blocking(move || {
        apod_desktop::desktop::set_desktop_background(&path)
            .map(|()| path)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
