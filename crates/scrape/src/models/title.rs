// ABOUTME: Scraped title records: the main title page, its technical specs, and individual credits.
// ABOUTME: Each record is built once from a raw text draft; numbers and dates that fail to parse stay unset.

use std::fmt;

use chrono::NaiveDate;
use marquee_core::{to_int, to_opt_datetime, Currency};
use serde::{Deserialize, Serialize};

/// Credit job titles used for `CreditScrape::job_title`.
pub mod job_title {
    pub const ACTOR: &str = "actor";
    pub const DIRECTOR: &str = "director";
    pub const PRODUCER: &str = "producer";
    pub const WRITER: &str = "writer";
    pub const MUSIC: &str = "music";
    pub const CINEMATOGRAPHY: &str = "cinematography";
    pub const FILM_EDITING: &str = "film editing";
    pub const CASTING: &str = "casting";
    pub const PRODUCTION_DESIGN: &str = "production design";
    pub const ART_DIRECTOR: &str = "art director";
    pub const SET_DECORATION: &str = "set decoration";
    pub const COSTUME_DESIGN: &str = "costume design";
    pub const MAKEUP_DEPARTMENT: &str = "makeup department";
    pub const PRODUCTION_MANAGER: &str = "production manager";
    pub const ASSISTANT_DIRECTOR: &str = "assistant director";
    pub const ART_DEPARTMENT: &str = "art department";
    pub const SOUND_DEPARTMENT: &str = "sound department";
    pub const SPECIAL_EFFECTS: &str = "special effects";
    pub const VISUAL_EFFECTS: &str = "visual effects";
    pub const STUNTS: &str = "stunts";
    pub const CAMERA_AND_ELECTRICAL_DEPARTMENT: &str = "camera and electrical department";
    pub const ANIMATION_DEPARTMENT: &str = "animation department";
    pub const CASTING_DEPARTMENT: &str = "casting department";
    pub const COSTUME_AND_WARDROBE_DEPARTMENT: &str = "costume and wardrobe department";
    pub const EDITORIAL_DEPARTMENT: &str = "editorial department";
    pub const LOCATION_MANAGEMENT: &str = "location management";
    pub const MUSIC_DEPARTMENT: &str = "music department";
    pub const SCRIPT_DEPARTMENT: &str = "script department";
    pub const TRANSPORTATION_DEPARTMENT: &str = "transportation department";
    pub const OTHER_CREW: &str = "other crew";
    pub const ADDITIONAL_CREW: &str = "additional crew";
    pub const THANKS: &str = "thanks";

    /// Section headings on the full-credits page, lowercased, with their job title.
    pub const CREDIT_HEADINGS: &[(&str, &str)] = &[
        ("directed by", DIRECTOR),
        ("produced by", PRODUCER),
        ("writing credits", WRITER),
        ("music by", MUSIC),
        ("cinematography by", CINEMATOGRAPHY),
        ("film editing by", FILM_EDITING),
        ("casting by", CASTING),
        ("production design by", PRODUCTION_DESIGN),
        ("art direction by", ART_DIRECTOR),
        ("set decoration by", SET_DECORATION),
        ("costume design by", COSTUME_DESIGN),
        ("makeup department", MAKEUP_DEPARTMENT),
        ("production management", PRODUCTION_MANAGER),
        (
            "second unit director or assistant director",
            ASSISTANT_DIRECTOR,
        ),
        ("art department", ART_DEPARTMENT),
        ("sound department", SOUND_DEPARTMENT),
        ("special effects by", SPECIAL_EFFECTS),
        ("visual effects by", VISUAL_EFFECTS),
        ("stunts", STUNTS),
        (
            "camera and electrical department",
            CAMERA_AND_ELECTRICAL_DEPARTMENT,
        ),
        ("animation department", ANIMATION_DEPARTMENT),
        ("casting department", CASTING_DEPARTMENT),
        (
            "costume and wardrobe department",
            COSTUME_AND_WARDROBE_DEPARTMENT,
        ),
        ("editorial department", EDITORIAL_DEPARTMENT),
        ("location management", LOCATION_MANAGEMENT),
        ("music department", MUSIC_DEPARTMENT),
        ("script and continuity department", SCRIPT_DEPARTMENT),
        ("transportation department", TRANSPORTATION_DEPARTMENT),
        ("other crew", OTHER_CREW),
        ("additional crew", ADDITIONAL_CREW),
        ("thanks", THANKS),
    ];

    /// Job title for a lowercased section heading.
    pub fn for_heading(heading: &str) -> Option<&'static str> {
        CREDIT_HEADINGS
            .iter()
            .find(|(h, _)| *h == heading)
            .map(|(_, job)| *job)
    }
}

/// Raw text gathered from a title's credit row, before coercion.
#[derive(Debug, Clone, Default)]
pub struct RawCredit {
    pub name_id: Option<String>,
    pub title_id: Option<String>,
    pub job_title: String,
    pub credit: Option<String>,
    pub episode_count: Option<String>,
    pub episode_year_start: Option<String>,
    pub episode_year_end: Option<String>,
}

/// One person credited on a title, as cast or crew.
///
/// Ordered by every field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreditScrape {
    name_id: Option<String>,
    title_id: Option<String>,
    job_title: String,
    credit: Option<String>,
    episode_count: Option<i64>,
    episode_year_start: Option<i64>,
    episode_year_end: Option<i64>,
}

impl CreditScrape {
    pub fn name_id(&self) -> Option<&str> {
        self.name_id.as_deref()
    }

    /// The credited title; for per-episode credits this is the episode.
    pub fn title_id(&self) -> Option<&str> {
        self.title_id.as_deref()
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    /// Character for cast, or the credit note for crew.
    pub fn credit(&self) -> Option<&str> {
        self.credit.as_deref()
    }

    pub fn episode_count(&self) -> Option<i64> {
        self.episode_count
    }

    pub fn episode_year_start(&self) -> Option<i64> {
        self.episode_year_start
    }

    pub fn episode_year_end(&self) -> Option<i64> {
        self.episode_year_end
    }
}

impl From<RawCredit> for CreditScrape {
    fn from(raw: RawCredit) -> Self {
        Self {
            name_id: raw.name_id,
            title_id: raw.title_id,
            job_title: raw.job_title,
            credit: raw.credit,
            episode_count: to_int(raw.episode_count.as_deref()),
            episode_year_start: to_int(raw.episode_year_start.as_deref()),
            episode_year_end: to_int(raw.episode_year_end.as_deref()),
        }
    }
}

impl fmt::Display for CreditScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} in {}",
            self.name_id.as_deref().unwrap_or("?"),
            self.job_title,
            self.title_id.as_deref().unwrap_or("?")
        )?;
        if let Some(credit) = &self.credit {
            write!(f, " as {credit}")?;
        }
        if let Some(count) = self.episode_count {
            write!(f, " in {count} episodes")?;
        }
        Ok(())
    }
}

/// Raw text gathered from a title's main page.
#[derive(Debug, Clone, Default)]
pub struct RawTitle {
    pub title_id: String,
    pub display_title: Option<String>,
    pub title_parent_id: Option<String>,
    pub mpaa_rating: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<String>,
    pub end_year: Option<String>,
    pub season_number: Option<String>,
    pub episode_number: Option<String>,
    pub taglines: Vec<String>,
    pub plot: Option<String>,
    pub storyline: Option<String>,
    pub production_companies: Vec<String>,
    pub top_cast: Vec<CreditScrape>,
    pub budget: Option<String>,
    pub budget_denomination: Option<Currency>,
    pub opening_weekend_gross: Option<String>,
    pub opening_weekend_date: Option<String>,
    pub usa_gross: Option<String>,
    pub worldwide_gross: Option<String>,
}

/// Information from a title's main page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleScrape {
    title_id: String,
    display_title: Option<String>,
    title_parent_id: Option<String>,
    mpaa_rating: Option<String>,
    country: Option<String>,
    language: Option<String>,
    release_date: Option<NaiveDate>,
    end_year: Option<i64>,
    season_number: Option<i64>,
    episode_number: Option<i64>,
    taglines: Vec<String>,
    plot: Option<String>,
    storyline: Option<String>,
    production_companies: Vec<String>,
    top_cast: Vec<CreditScrape>,
    budget: Option<i64>,
    budget_denomination: Option<Currency>,
    opening_weekend_gross: Option<i64>,
    opening_weekend_date: Option<NaiveDate>,
    usa_gross: Option<i64>,
    worldwide_gross: Option<i64>,
}

impl TitleScrape {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    pub fn display_title(&self) -> Option<&str> {
        self.display_title.as_deref()
    }

    /// Parent series of an episode.
    pub fn title_parent_id(&self) -> Option<&str> {
        self.title_parent_id.as_deref()
    }

    pub fn mpaa_rating(&self) -> Option<&str> {
        self.mpaa_rating.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// Year a series ended.
    pub fn end_year(&self) -> Option<i64> {
        self.end_year
    }

    pub fn season_number(&self) -> Option<i64> {
        self.season_number
    }

    pub fn episode_number(&self) -> Option<i64> {
        self.episode_number
    }

    pub fn taglines(&self) -> &[String] {
        &self.taglines
    }

    pub fn plot(&self) -> Option<&str> {
        self.plot.as_deref()
    }

    pub fn storyline(&self) -> Option<&str> {
        self.storyline.as_deref()
    }

    /// `co` IDs of the production companies.
    pub fn production_companies(&self) -> &[String] {
        &self.production_companies
    }

    pub fn top_cast(&self) -> &[CreditScrape] {
        &self.top_cast
    }

    pub fn budget(&self) -> Option<i64> {
        self.budget
    }

    pub fn budget_denomination(&self) -> Option<Currency> {
        self.budget_denomination
    }

    pub fn opening_weekend_gross(&self) -> Option<i64> {
        self.opening_weekend_gross
    }

    pub fn opening_weekend_date(&self) -> Option<NaiveDate> {
        self.opening_weekend_date
    }

    pub fn usa_gross(&self) -> Option<i64> {
        self.usa_gross
    }

    pub fn worldwide_gross(&self) -> Option<i64> {
        self.worldwide_gross
    }
}

impl From<RawTitle> for TitleScrape {
    fn from(raw: RawTitle) -> Self {
        Self {
            title_id: raw.title_id,
            display_title: raw.display_title,
            title_parent_id: raw.title_parent_id,
            mpaa_rating: raw.mpaa_rating,
            country: raw.country,
            language: raw.language,
            release_date: to_opt_datetime(raw.release_date.as_deref()),
            end_year: to_int(raw.end_year.as_deref()),
            season_number: to_int(raw.season_number.as_deref()),
            episode_number: to_int(raw.episode_number.as_deref()),
            taglines: raw.taglines,
            plot: raw.plot,
            storyline: raw.storyline,
            production_companies: raw.production_companies,
            top_cast: raw.top_cast,
            budget: to_int(raw.budget.as_deref()),
            budget_denomination: raw.budget_denomination,
            opening_weekend_gross: to_int(raw.opening_weekend_gross.as_deref()),
            opening_weekend_date: to_opt_datetime(raw.opening_weekend_date.as_deref()),
            usa_gross: to_int(raw.usa_gross.as_deref()),
            worldwide_gross: to_int(raw.worldwide_gross.as_deref()),
        }
    }
}

impl fmt::Display for TitleScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.display_title.as_deref().unwrap_or("?"),
            self.title_id
        )?;
        if let Some(rating) = &self.mpaa_rating {
            write!(f, ": {rating}")?;
        }
        if let Some(date) = self.release_date {
            write!(f, ", released {date}")?;
        }
        if let Some(end) = self.end_year {
            write!(f, ", ended {end}")?;
        }
        if let Some(season) = self.season_number {
            write!(f, " S{season}")?;
        }
        if let Some(episode) = self.episode_number {
            write!(f, "E{episode}")?;
        }
        Ok(())
    }
}

/// Raw text gathered from a title's technical specifications page.
#[derive(Debug, Clone, Default)]
pub struct RawTechSpecs {
    pub title_id: String,
    pub runtime: Option<String>,
    pub sound_mix: Vec<String>,
    pub color: Option<String>,
    pub aspect_ratio: Vec<String>,
    pub camera: Vec<String>,
    pub laboratory: Vec<String>,
    pub negative_format: Option<String>,
    pub cinematographic_process: Vec<String>,
    pub printed_film_format: Option<String>,
}

/// A title's technical specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTechSpecsScrape {
    title_id: String,
    runtime: Option<i64>,
    sound_mix: Vec<String>,
    color: Option<String>,
    aspect_ratio: Vec<String>,
    camera: Vec<String>,
    laboratory: Vec<String>,
    negative_format: Option<String>,
    cinematographic_process: Vec<String>,
    printed_film_format: Option<String>,
}

impl TitleTechSpecsScrape {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Runtime in minutes.
    pub fn runtime(&self) -> Option<i64> {
        self.runtime
    }

    pub fn sound_mix(&self) -> &[String] {
        &self.sound_mix
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn aspect_ratio(&self) -> &[String] {
        &self.aspect_ratio
    }

    pub fn camera(&self) -> &[String] {
        &self.camera
    }

    pub fn laboratory(&self) -> &[String] {
        &self.laboratory
    }

    pub fn negative_format(&self) -> Option<&str> {
        self.negative_format.as_deref()
    }

    pub fn cinematographic_process(&self) -> &[String] {
        &self.cinematographic_process
    }

    pub fn printed_film_format(&self) -> Option<&str> {
        self.printed_film_format.as_deref()
    }
}

impl From<RawTechSpecs> for TitleTechSpecsScrape {
    fn from(raw: RawTechSpecs) -> Self {
        Self {
            title_id: raw.title_id,
            runtime: to_int(raw.runtime.as_deref()),
            sound_mix: raw.sound_mix,
            color: raw.color,
            aspect_ratio: raw.aspect_ratio,
            camera: raw.camera,
            laboratory: raw.laboratory,
            negative_format: raw.negative_format,
            cinematographic_process: raw.cinematographic_process,
            printed_film_format: raw.printed_film_format,
        }
    }
}

impl fmt::Display for TitleTechSpecsScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tech specs: ", self.title_id)?;
        match self.runtime {
            Some(runtime) => write!(f, "{runtime}m runtime")?,
            None => f.write_str("unknown runtime")?,
        }
        if !self.aspect_ratio.is_empty() {
            write!(f, ", {} ratio", self.aspect_ratio.join(" / "))?;
        }
        Ok(())
    }
}
