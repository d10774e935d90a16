// src/feed/renderer.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use crate::core::FeedConfig;
use crate::types::JobRecord;
use crate::utils::{format_thousands, host_matches, title_case, truncate_with_ellipsis, url_host};

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
const DESCRIPTION_LIMIT: usize = 500;
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Channel-level metadata for one rendered feed.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub title: String,
    pub description: String,
    pub link: String,
    pub generator: String,
    pub language: String,
    pub category: String,
    pub generic_job_boards: Vec<String>,
}

impl ChannelInfo {
    /// Fill unset titles from the role ("nurse" -> "Daily Nurse Jobs Feed").
    pub fn for_role(config: &FeedConfig, role: &str) -> Self {
        let display_role = title_case(role);
        Self {
            title: config
                .title
                .clone()
                .unwrap_or_else(|| format!("Daily {} Jobs Feed", display_role)),
            description: config.description.clone().unwrap_or_else(|| {
                format!(
                    "Daily feed of {} jobs with direct company application links",
                    role.to_lowercase()
                )
            }),
            link: config.link.clone(),
            generator: config
                .generator
                .clone()
                .unwrap_or_else(|| format!("{} Job Search Bot", display_role)),
            language: config.language.clone(),
            category: config.category.clone(),
            generic_job_boards: config.generic_job_boards.clone(),
        }
    }

    /// True when `url` points at an aggregator rather than the employer.
    pub fn is_generic_board(&self, url: &str) -> bool {
        match url_host(url) {
            Some(host) => self
                .generic_job_boards
                .iter()
                .any(|domain| host_matches(&host, domain)),
            None => false,
        }
    }

    pub fn has_direct_url(&self, job: &JobRecord) -> bool {
        job.job_url_direct
            .as_deref()
            .map(|url| !self.is_generic_board(url))
            .unwrap_or(false)
    }
}

/// One `<item>` ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    pub guid: String,
    pub pub_date: String,
    pub description: String,
    /// Structured sibling tags, in output order.
    pub fields: Vec<(&'static str, String)>,
}

impl FeedItem {
    pub fn from_record(job: &JobRecord, channel: &ChannelInfo, now: DateTime<Utc>) -> Self {
        Self {
            title: format!("{} at {}", job.title, job.company),
            link: job
                .job_url_direct
                .clone()
                .or_else(|| job.job_board_url.clone()),
            guid: job.identity_key(),
            pub_date: now.format(RFC822_FORMAT).to_string(),
            description: describe(job, channel),
            fields: structured_fields(job, channel),
        }
    }
}

fn salary_line(job: &JobRecord) -> Option<String> {
    match (job.min_amount, job.max_amount) {
        (Some(min), Some(max)) => Some(format!(
            "💰 Salary: {} {} - {} ({})",
            job.currency,
            format_thousands(min),
            format_thousands(max),
            job.interval
        )),
        (Some(min), None) => Some(format!(
            "💰 Salary: {} {}+ ({})",
            job.currency,
            format_thousands(min),
            job.interval
        )),
        _ => None,
    }
}

fn describe(job: &JobRecord, channel: &ChannelInfo) -> String {
    let mut lines = Vec::new();

    if !job.location.is_empty() {
        lines.push(format!("📍 Location: {}", job.location));
    }
    if let Some(job_type) = &job.job_type {
        lines.push(format!("💼 Type: {}", job_type.title_case()));
    }
    if let Some(remote) = job.is_remote {
        let status = if remote { "Remote" } else { "On-site" };
        lines.push(format!("🏠 Work: {}", status));
    }
    if let Some(salary) = salary_line(job) {
        lines.push(salary);
    }
    if let Some(description) = &job.description {
        lines.push(format!(
            "\n📝 Description: {}",
            truncate_with_ellipsis(description, DESCRIPTION_LIMIT)
        ));
    }
    if let Some(direct) = &job.job_url_direct {
        if !channel.is_generic_board(direct) {
            lines.push(format!("🔗 Apply Direct: {}", direct));
        }
    }
    if let Some(board) = &job.job_board_url {
        lines.push(format!("🔗 Job Board: {}", board));
    }

    lines.join("\n")
}

fn structured_fields(job: &JobRecord, channel: &ChannelInfo) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    let has_salary = job.min_amount.is_some() || job.max_amount.is_some();

    if !job.company.is_empty() {
        fields.push(("companyName", job.company.clone()));
    }
    if let Some(job_type) = &job.job_type {
        fields.push(("jobType", job_type.title_case()));
    }
    if !job.location.is_empty() {
        fields.push(("jobLocation", job.location.clone()));
    }
    if let Some(min) = job.min_amount {
        fields.push(("salaryMin", (min as i64).to_string()));
    }
    if let Some(max) = job.max_amount {
        fields.push(("salaryMax", (max as i64).to_string()));
    }
    if has_salary {
        fields.push(("salarySchedule", job.interval.to_lowercase()));
        fields.push(("salaryCurrency", job.currency.clone()));
    }
    if let Some(remote) = job.is_remote {
        fields.push(("isRemote", remote.to_string()));
    }
    fields.push(("category", channel.category.clone()));

    fields
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &FeedItem) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", &item.title)?;
    if let Some(link) = &item.link {
        text_element(writer, "link", link)?;
    }
    writer
        .create_element("guid")
        .with_attribute(("isPermaLink", "false"))
        .write_text_content(BytesText::new(&item.guid))?;
    text_element(writer, "pubDate", &item.pub_date)?;
    text_element(writer, "description", &item.description)?;
    for (name, value) in &item.fields {
        text_element(writer, name, value)?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Render a complete RSS 2.0 document, two-space indented, UTF-8.
pub fn render_feed(jobs: &[JobRecord], channel: &ChannelInfo, now: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "description", &channel.description)?;
    text_element(&mut writer, "link", &channel.link)?;
    text_element(&mut writer, "lastBuildDate", &now.format(RFC822_FORMAT).to_string())?;
    text_element(&mut writer, "generator", &channel.generator)?;
    text_element(&mut writer, "language", &channel.language)?;

    for job in jobs {
        write_item(&mut writer, &FeedItem::from_record(job, channel, now))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
