// ABOUTME: Integration tests for the pure page parsers against trimmed-down page fixtures.
// ABOUTME: Covers title, full credits, bio, filmography, company search, company credits and tech specs pages.

use chrono::NaiveDate;
use marquee_core::Currency;
use marquee_scrape::job_title;
use marquee_scrape::pages::{company, credits, name, tech_specs, title};
use marquee_scrape::{NameScrape, TitleScrape, TitleTechSpecsScrape};
use pretty_assertions::assert_eq;

const TITLE_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>The Matrix (1999) - IMDb</title></head><body>
<div class="title_wrapper">
  <h1 class="">The Matrix&nbsp;<span id="titleYear">(<a href="/year/1999/">1999</a>)</span></h1>
  <div class="subtext">
    R <span class="ghost">|</span>
    <time datetime="PT136M">2h 16min</time> <span class="ghost">|</span>
    <a href="/search/title?genres=action">Action</a>,
    <a href="/search/title?genres=sci-fi">Sci-Fi</a> <span class="ghost">|</span>
    <a href="/title/tt0133093/releaseinfo" title="See more release dates">31 March 1999 (USA)</a>
  </div>
</div>
<div class="plot_summary">
  <div class="summary_text">
    When a beautiful stranger leads computer hacker Neo to a forbidding underworld, he discovers the shocking truth.
  </div>
</div>
<table class="cast_list">
  <tr><td colspan="4" class="castlist_label">Cast overview, first billed only:</td></tr>
  <tr class="odd">
    <td class="primary_photo"><a href="/name/nm0000206/"><img alt="Keanu Reeves"></a></td>
    <td><a href="/name/nm0000206/"> Keanu Reeves</a></td>
    <td class="ellipsis">...</td>
    <td class="character"><a href="/title/tt0133093/characters/nm0000206">Neo</a></td>
  </tr>
  <tr class="even">
    <td class="primary_photo"><a href="/name/nm0000401/"><img alt="Laurence Fishburne"></a></td>
    <td><a href="/name/nm0000401/"> Laurence Fishburne</a></td>
    <td class="ellipsis">...</td>
    <td class="character">
      Morpheus
    </td>
  </tr>
</table>
<div id="titleStoryLine">
  <h2>Storyline</h2>
  <div class="inline canwrap"><p><span>Thomas A. Anderson is a man living two lives.</span></p></div>
</div>
<div id="titleDetails">
  <h2>Details</h2>
  <div class="txt-block"><h4 class="inline">Country:</h4> <a href="/search/title?country_of_origin=us">USA</a></div>
  <div class="txt-block"><h4 class="inline">Language:</h4> <a href="/search/title?title_type=feature&amp;primary_language=en">English</a></div>
  <div class="txt-block"><h4 class="inline">Release Date:</h4> 31 March 1999 (USA)
    <span class="see-more inline"><a href="/title/tt0133093/releaseinfo">See more</a>&nbsp;&raquo;</span></div>
  <div class="txt-block"><h4 class="inline">Budget:</h4>$63,000,000 <span class="attribute">(estimated)</span></div>
  <div class="txt-block"><h4 class="inline">Opening Weekend USA:</h4> $27,788,331, <span class="attribute">2 April 1999</span></div>
  <div class="txt-block"><h4 class="inline">Gross USA:</h4> $171,479,930</div>
  <div class="txt-block"><h4 class="inline">Cumulative Worldwide Gross:</h4> $463,517,383</div>
  <div class="txt-block"><h4 class="inline">Production Co:</h4>
    <span><a href="/company/co0002663?ref_=tt_dt_co">Warner Bros.</a></span>,
    <span><a href="/company/co0108864?ref_=tt_dt_co">Village Roadshow Pictures</a></span>
  </div>
</div>
</body></html>"#;

#[test]
fn test_title_page_fields() {
    let scrape = TitleScrape::from(title::parse_title_page(TITLE_PAGE, "tt0133093"));

    assert_eq!(scrape.title_id(), "tt0133093");
    assert_eq!(scrape.display_title(), Some("The Matrix"));
    assert_eq!(scrape.mpaa_rating(), Some("R"));
    assert_eq!(scrape.end_year(), None);
    assert_eq!(scrape.title_parent_id(), None);
    assert_eq!(scrape.country(), Some("USA"));
    assert_eq!(scrape.language(), Some("English"));
    assert_eq!(
        scrape.release_date(),
        NaiveDate::from_ymd_opt(1999, 3, 31)
    );
    assert_eq!(
        scrape.plot(),
        Some("When a beautiful stranger leads computer hacker Neo to a forbidding underworld, he discovers the shocking truth.")
    );
    assert_eq!(
        scrape.storyline(),
        Some("Thomas A. Anderson is a man living two lives.")
    );
    assert_eq!(scrape.production_companies(), ["co0002663", "co0108864"]);
    assert_eq!(scrape.budget(), Some(63_000_000));
    assert_eq!(scrape.budget_denomination(), Some(Currency::Usd));
    assert_eq!(scrape.opening_weekend_gross(), Some(27_788_331));
    assert_eq!(
        scrape.opening_weekend_date(),
        NaiveDate::from_ymd_opt(1999, 4, 2)
    );
    assert_eq!(scrape.usa_gross(), Some(171_479_930));
    assert_eq!(scrape.worldwide_gross(), Some(463_517_383));
    assert!(scrape.taglines().is_empty());
}

#[test]
fn test_title_page_top_cast() {
    let scrape = TitleScrape::from(title::parse_title_page(TITLE_PAGE, "tt0133093"));
    let cast: Vec<(Option<&str>, Option<&str>, &str)> = scrape
        .top_cast()
        .iter()
        .map(|c| (c.name_id(), c.credit(), c.job_title()))
        .collect();
    assert_eq!(
        cast,
        vec![
            (Some("nm0000206"), Some("Neo"), job_title::ACTOR),
            (Some("nm0000401"), Some("Morpheus"), job_title::ACTOR),
        ]
    );
}

#[test]
fn test_episode_page_season_and_parent() {
    let html = r#"<html><body>
        <div class="titleParent"><a href="/title/tt0108778/?ref_=tt_ov_inf">Friends</a></div>
        <div class="title_wrapper"><h1>The One Where Monica Gets a Roommate</h1>
          <div class="subtext">TV-PG <span>|</span> <a href="/title/tt0583459/releaseinfo">Episode aired 22 September 1994</a></div>
        </div>
        <div class="bp_item"><div class="bp_heading">Season 1 <span class="bp_divider">|</span> Episode 1</div></div>
    </body></html>"#;
    let scrape = TitleScrape::from(title::parse_title_page(html, "tt0583459"));
    assert_eq!(scrape.title_parent_id(), Some("tt0108778"));
    assert_eq!(scrape.season_number(), Some(1));
    assert_eq!(scrape.episode_number(), Some(1));
    assert_eq!(scrape.mpaa_rating(), Some("TV-PG"));
}

#[test]
fn test_series_end_year() {
    let html = r#"<html><body><div class="title_wrapper"><h1>Friends</h1>
        <div class="subtext">TV-14 <span>|</span> <a href="/title/tt0108778/releaseinfo">TV Series (1994–2004)</a></div>
    </div></body></html>"#;
    let scrape = TitleScrape::from(title::parse_title_page(html, "tt0108778"));
    assert_eq!(scrape.end_year(), Some(2004));
}

#[test]
fn test_taglines() {
    let html = r#"<html><body><div id="taglines_content">
        <div class="soda odd"> Free your mind. </div>
        <div class="soda even">The fight for the future begins.</div>
    </div></body></html>"#;
    assert_eq!(
        title::parse_taglines(html),
        vec!["Free your mind.", "The fight for the future begins."]
    );
}

const FULL_CREDITS_PAGE: &str = r##"<html><body>
<div id="fullcredits_content" class="header">
  <h4 name="director" id="director" class="dataHeaderWithBorder">Series Directed by&nbsp;<span>(2)</span></h4>
  <table class="simpleTable simpleCreditsTable">
    <tbody>
      <tr>
        <td class="name"><a href="/name/nm0149446/"> Kevin Bright</a></td>
        <td>...</td>
        <td class="credit">(54 episodes, 1994-2004)</td>
      </tr>
      <tr>
        <td class="name"><a href="/name/nm0373282/"> Gary Halvorson</a></td>
        <td>...</td>
        <td class="credit">(55 episodes, 1998-2004)</td>
      </tr>
    </tbody>
  </table>
  <h4 name="cast" id="cast" class="dataHeaderWithBorder">Series Cast</h4>
  <table class="cast_list">
    <tr><td colspan="4" class="castlist_label"></td></tr>
    <tr class="odd">
      <td class="primary_photo"><a href="/name/nm0000098/"><img alt="Jennifer Aniston"></a></td>
      <td><a href="/name/nm0000098/"> Jennifer Aniston</a></td>
      <td class="ellipsis">...</td>
      <td class="character">
        <a href="/title/tt0108778/characters/nm0000098">Rachel Green</a>
        <a href="#" class="toggle-episodes" onclick="toggleSeeMoreEpisodes('nm0000098', 'tt0108778', 'actress', 'actress', 'tt_cl_t1');">236 episodes, 1994-2004</a>
      </td>
    </tr>
  </table>
  <h4 class="dataHeaderWithBorder">Series Zeppelin Wranglers</h4>
  <table class="simpleTable simpleCreditsTable">
    <tr>
      <td class="name"><a href="/name/nm9999999/"> Someone</a></td>
      <td>...</td>
      <td class="credit">head wrangler</td>
    </tr>
  </table>
</div>
</body></html>"##;

#[test]
fn test_full_cast_with_episode_toggle() {
    let cast = credits::parse_full_cast(FULL_CREDITS_PAGE, "tt0108778");
    assert_eq!(cast.len(), 1);
    let member = &cast[0];
    assert_eq!(member.episodes_ref_marker.as_deref(), Some("tt_cl_t1"));
    assert_eq!(member.credit.name_id(), Some("nm0000098"));
    assert_eq!(member.credit.credit(), Some("Rachel Green"));
    assert_eq!(member.credit.episode_count(), Some(236));
    assert_eq!(member.credit.episode_year_start(), Some(1994));
    assert_eq!(member.credit.episode_year_end(), Some(2004));
}

#[test]
fn test_full_crew_sections() {
    let crew = credits::parse_full_crew(FULL_CREDITS_PAGE, "tt0108778");
    let summary: Vec<(Option<&str>, &str, Option<&str>, Option<i64>)> = crew
        .iter()
        .map(|c| (c.name_id(), c.job_title(), c.credit(), c.episode_count()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("nm0149446"), job_title::DIRECTOR, None, Some(54)),
            (Some("nm0373282"), job_title::DIRECTOR, None, Some(55)),
            (Some("nm9999999"), "zeppelin wranglers", Some("head wrangler"), None),
        ]
    );
}

#[test]
fn test_cast_episode_list() {
    let html = r#"<html><body>
        <div class="filmo-episodes">- <a href="/title/tt0583459/">The One Where Monica Gets a Roommate</a> (1994) ... Rachel Green</div>
        <div class="filmo-episodes">- <a href="/title/tt0583647/">The One with the Sonogram at the End</a> (1994)</div>
    </body></html>"#;
    let episodes = credits::parse_cast_episodes(html, Some("nm0000098"));
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].title_id(), Some("tt0583459"));
    assert_eq!(episodes[0].episode_year_start(), Some(1994));
    assert_eq!(episodes[0].credit(), Some("Rachel Green"));
    assert_eq!(episodes[1].credit(), None);
}

#[test]
fn test_bio_page() {
    let html = r#"<html><body>
    <div id="main">
      <div class="article"><div class="subpage_title_block">
        <div class="parent"><h3 itemprop="name"><a href="/name/nm0000206/?ref_=nmbio_bio_nm">Keanu Reeves</a></h3></div>
      </div></div>
      <div id="bio_content">
        <table id="overviewTable">
          <tr><td class="label">Born</td><td><time datetime="1964-9-2">September 2, 1964</time> in <a href="/search/name?birth_place=Beirut">Beirut, Lebanon</a></td></tr>
          <tr><td class="label">Birth Name</td><td>Keanu Charles Reeves</td></tr>
          <tr><td class="label">Nicknames</td><td>The Wall<br>Keanster<br/></td></tr>
          <tr><td class="label">Height</td><td>6&#39; 1&#34; (1.86 m)</td></tr>
        </table>
      </div>
    </div>
    </body></html>"#;
    let scrape = NameScrape::from(name::parse_bio(html, "nm0000206"));
    assert_eq!(scrape.display_name(), Some("Keanu Reeves"));
    assert_eq!(scrape.birth_date(), NaiveDate::from_ymd_opt(1964, 9, 2));
    assert_eq!(scrape.birth_city(), Some("Beirut, Lebanon"));
    assert_eq!(scrape.birth_name(), Some("Keanu Charles Reeves"));
    assert_eq!(scrape.nicknames(), ["The Wall", "Keanster"]);
    assert_eq!(scrape.height(), Some(1.86));
    assert_eq!(scrape.death_date(), None);
}

#[test]
fn test_bio_death_cause() {
    let html = r#"<html><body><div id="bio_content"><table id="overviewTable">
        <tr><td class="label">Died</td><td><time datetime="2014-8-11">August 11, 2014</time> in <a href="/search/name?death_place=Paradise%20Cay">Paradise Cay, California, USA</a>  (suicide)</td></tr>
    </table></div></body></html>"#;
    let scrape = NameScrape::from(name::parse_bio(html, "nm0000245"));
    assert_eq!(scrape.death_date(), NaiveDate::from_ymd_opt(2014, 8, 11));
    assert_eq!(scrape.death_city(), Some("Paradise Cay, California, USA"));
    assert_eq!(scrape.death_cause(), Some("suicide"));
}

#[test]
fn test_known_for_strip() {
    let html = r#"<html><body><div id="knownfor">
        <div class="knownfor-title"><div class="knownfor-title-role"><a href="/title/tt0133093/">The Matrix</a></div></div>
        <div class="knownfor-title"><div class="knownfor-title-role"><a href="/title/tt0111257/">Speed</a></div></div>
    </div></body></html>"#;
    assert_eq!(name::parse_known_for(html), vec!["tt0133093", "tt0111257"]);
}

const FILMOGRAPHY_PAGE: &str = r##"<html><body><div id="filmography">
  <div class="filmo-category-section">
    <div class="filmo-row odd" id="actor-tt0234215">
      <span class="year_column">&nbsp;2003</span>
      <b><a href="/title/tt0234215/">The Matrix Reloaded</a></b>
      <br/>
      Neo
    </div>
    <div class="filmo-row even" id="actor-tt0106179">
      <span class="year_column">&nbsp;1993/I</span>
      <b><a href="/title/tt0106179/">Some Series</a></b> (TV Series)
      <br/>
      <div class="filmo-episodes">- <a href="/title/tt0700001/">Pilot</a> (1993) ... Guest</div>
    </div>
    <div class="filmo-row odd" id="actor-tt0108778">
      <span class="year_column">&nbsp;1994-2004</span>
      <b><a href="/title/tt0108778/">Long Series</a></b> (TV Series) (uncredited)
      <br/>
      Himself
      <div class="filmo-episodes">- <a href="/title/tt0583459/">First</a> (1994) ... Himself</div>
      <div id="more-episodes-tt0108778-actor" class="filmo-episodes">Show all</div>
      <div class="filmo-episodes"><div><a href="#" onclick="filmoSeeMoreEpisodes('nm0000206', 'tt0108778', 'actor', 'actor', 'nm_flmg_eps_act_3');">Show all 12 episodes</a></div></div>
    </div>
  </div>
</div></body></html>"##;

#[test]
fn test_filmography_rows() {
    let rows = name::parse_filmography(FILMOGRAPHY_PAGE, "nm0000206");
    assert_eq!(rows.len(), 3);

    let reloaded = &rows[0].credit;
    assert_eq!(reloaded.title_id(), Some("tt0234215"));
    assert_eq!(reloaded.category(), Some("actor"));
    assert_eq!(reloaded.start_year(), Some(2003));
    assert_eq!(reloaded.end_year(), None);
    assert_eq!(reloaded.role(), Some("Neo"));
    assert!(rows[0].episodes.is_empty());
    assert!(rows[0].more_episodes.is_none());

    let series = &rows[1];
    assert_eq!(series.credit.start_year(), Some(1993));
    assert_eq!(series.credit.role(), None);
    assert_eq!(series.credit.title_notes(), ["TV Series"]);
    assert_eq!(series.episodes.len(), 1);
    assert_eq!(series.episodes[0].title_id(), Some("tt0700001"));
    assert_eq!(series.episodes[0].start_year(), Some(1993));
    assert_eq!(series.episodes[0].role(), Some("Guest"));
    assert!(series.more_episodes.is_none());

    let long = &rows[2];
    assert_eq!(long.credit.start_year(), Some(1994));
    assert_eq!(long.credit.end_year(), Some(2004));
    assert_eq!(long.credit.role(), Some("Himself"));
    assert_eq!(long.credit.title_notes(), ["TV Series", "uncredited"]);
    assert_eq!(
        long.more_episodes,
        Some(name::EpisodesRequest {
            title_id: "tt0108778".to_string(),
            category: Some("actor".to_string()),
            ref_marker: Some("nm_flmg_eps_act_3".to_string()),
        })
    );
    let inline: Vec<Option<&str>> = long.episodes.iter().map(|e| e.title_id()).collect();
    assert_eq!(inline, vec![Some("tt0583459")]);
}

#[test]
fn test_company_search_episode_listing() {
    let html = r#"<html><body><div class="article">
      <h1 class="header">Warner Bros. Television (Sorted by Popularity Ascending)</h1>
      <div class="lister-list">
        <div class="lister-item mode-simple">
          <span class="lister-item-header">
            <span class="lister-item-index unbold text-primary">1.</span>
            <a href="/title/tt0108778/">Friends</a>
            <span class="lister-item-year text-muted unbold">(1994–2004)</span>
            <br/><small class="text-primary unbold">Episode:</small>
            <a href="/title/tt0583459/">The One Where Monica Gets a Roommate</a>
            <span class="lister-item-year text-muted unbold">(1994)</span>
          </span>
        </div>
        <div class="lister-item mode-simple">
          <span class="lister-item-header">
            <span class="lister-item-index unbold text-primary">2.</span>
            <span title="Movie"><a href="/title/tt0133093/">The Matrix</a>
              <span class="lister-item-year text-muted unbold">(1999)</span></span>
          </span>
        </div>
      </div>
    </div></body></html>"#;
    let page = company::parse_company_search(html, "co0005035");
    assert!(!page.invalid_company);
    let titles = page.titles.expect("listing present");
    let summary: Vec<(Option<&str>, Option<i64>, Option<i64>)> = titles
        .iter()
        .map(|t| (t.title_id(), t.start_year(), t.end_year()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("tt0583459"), Some(1994), None),
            (Some("tt0133093"), Some(1999), None),
        ]
    );
}

#[test]
fn test_company_search_without_listing() {
    let html = r#"<html><body><div class="article"><h1 class="header">Warner Bros.</h1>
        <div class="desc">No results.</div></div></body></html>"#;
    let page = company::parse_company_search(html, "co0002663");
    assert!(!page.invalid_company);
    assert!(page.titles.is_none());
}

#[test]
fn test_company_credits() {
    let html = r#"<html><body><div id="company_credits_content">
      <h4 class="dataHeaderWithBorder" id="production" name="production">Production Companies</h4>
      <ul class="simpleList">
        <li><a href="/company/co0002663?ref_=ttco_co_1">Warner Bros.</a> (presents)</li>
        <li><a href="/company/co0108864?ref_=ttco_co_2">Village Roadshow Pictures</a> (in association with)</li>
      </ul>
      <h4 class="dataHeaderWithBorder" id="distributors" name="distributors">Distributors</h4>
      <ul class="simpleList">
        <li><a href="/company/co0002663?ref_=ttco_co_3">Warner Bros.</a> (1999) (USA) (theatrical)</li>
      </ul>
    </div></body></html>"#;
    let credits = company::parse_company_credits(html, "tt0133093");
    assert_eq!(credits.len(), 3);
    assert_eq!(credits[0].company_id(), Some("co0002663"));
    assert_eq!(credits[0].company_name(), Some("Warner Bros."));
    assert_eq!(credits[0].category(), Some("production"));
    assert_eq!(credits[0].notes(), ["presents"]);
    assert_eq!(credits[1].notes(), ["in association with"]);
    assert_eq!(credits[2].category(), Some("distributors"));
    assert_eq!(credits[2].notes(), ["1999", "USA", "theatrical"]);
}

#[test]
fn test_tech_specs_page() {
    let html = r#"<html><body><div id="technical_content"><table class="dataTable labelValueTable"><tbody>
      <tr class="odd"><td class="label">Runtime</td><td>2 hr 16 min (136 min)</td></tr>
      <tr class="even"><td class="label">Sound Mix</td><td><a href="/search/title?sound_mixes=dolby_digital">Dolby Digital</a> |
          <a href="/search/title?sound_mixes=sdds">SDDS</a></td></tr>
      <tr class="odd"><td class="label">Color</td><td><a href="/search/title?colors=color">Color</a></td></tr>
      <tr class="even"><td class="label">Aspect Ratio</td><td>2.39 : 1<br>1.78 : 1 (HD version)</td></tr>
      <tr class="odd"><td class="label">Camera</td><td>Panavision Panaflex Millennium, Panavision Primo Lenses and Canon Lenses</td></tr>
      <tr class="even"><td class="label">Laboratory</td><td>Atlab, Sydney, Australia</td></tr>
      <tr class="odd"><td class="label">Negative Format</td><td>35 mm
          <span class="attribute">(Kodak Vision 250D 5246)</span></td></tr>
      <tr class="even"><td class="label">Cinematographic Process</td><td>Super 35<br/>Digital Intermediate (master format)</td></tr>
      <tr class="odd"><td class="label">Printed Film Format</td><td>35 mm
          (anamorphic)</td></tr>
    </tbody></table></div></body></html>"#;
    let specs = TitleTechSpecsScrape::from(tech_specs::parse_tech_specs(html, "tt0133093"));
    assert_eq!(specs.runtime(), Some(136));
    assert_eq!(specs.sound_mix(), ["Dolby Digital", "SDDS"]);
    assert_eq!(specs.color(), Some("Color"));
    assert_eq!(specs.aspect_ratio(), ["2.39 : 1", "1.78 : 1 (HD version)"]);
    assert_eq!(
        specs.camera(),
        ["Panavision Panaflex Millennium", "Panavision Primo Lenses", "Canon Lenses"]
    );
    assert_eq!(specs.laboratory(), ["Atlab, Sydney, Australia"]);
    assert!(specs.negative_format().is_some_and(|f| f.starts_with("35 mm")));
    assert_eq!(
        specs.cinematographic_process(),
        ["Super 35", "Digital Intermediate (master format)"]
    );
    assert_eq!(specs.printed_film_format(), Some("35 mm (anamorphic)"));
}
