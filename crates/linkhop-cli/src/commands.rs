use anyhow::{bail, Context};
use linkhop_core::{Clock, LinkRecord, LinkStats, ShortCode, Store};
use linkhop_generator::RandomGenerator;
use linkhop_redirector::{Redirector, RedirectorService, Visit};
use linkhop_shortener::{ShortenRequest, Shortener, ShortenerService};
use linkhop_storage::LinkRegistry;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, wired over one shared store.
pub struct App<S, C> {
    store: Arc<S>,
    clock: C,
    base_url: String,
}

impl<S: Store, C: Clock + Clone> App<S, C> {
    pub fn new(store: Arc<S>, clock: C, base_url: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            base_url: base_url.into(),
        }
    }

    fn registry(&self) -> LinkRegistry<Arc<S>> {
        LinkRegistry::new(Arc::clone(&self.store))
    }

    fn shortener(&self) -> ShortenerService<Arc<S>, RandomGenerator, C> {
        ShortenerService::new(self.registry(), RandomGenerator::default(), self.clock.clone())
    }

    fn print_created(&self, out: &mut impl Write, record: &LinkRecord) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} -> {} (expires {})",
            record.shortcode().to_url(&self.base_url),
            record.original_url(),
            record.expiry_time()
        )?;
        Ok(())
    }

    pub fn submit(&self, out: &mut impl Write, batch: &[ShortenRequest]) -> anyhow::Result<()> {
        let receipt = self.shortener().submit(batch)?;

        writeln!(out, "{receipt}")?;
        for record in &receipt.records {
            self.print_created(out, record)?;
        }
        Ok(())
    }

    pub fn shorten(
        &self,
        out: &mut impl Write,
        url: String,
        alias: Option<String>,
        validity: Option<u32>,
    ) -> anyhow::Result<()> {
        let request = ShortenRequest {
            original_url: url,
            alias,
            validity_minutes: validity,
        };
        self.submit(out, std::slice::from_ref(&request))
    }

    pub fn batch(&self, out: &mut impl Write, file: &Path) -> anyhow::Result<()> {
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let batch: Vec<ShortenRequest> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array of requests", file.display()))?;

        self.submit(out, &batch)
    }

    pub fn open(
        &self,
        out: &mut impl Write,
        code: &str,
        referrer: Option<String>,
    ) -> anyhow::Result<()> {
        let redirector = RedirectorService::new(self.registry(), self.clock.clone());
        let visit = Visit {
            referrer,
            client: None,
        };

        let url = redirector.resolve(&ShortCode::new_unchecked(code), &visit)?;
        writeln!(out, "{url}")?;
        Ok(())
    }

    pub fn stats(&self, out: &mut impl Write, code: Option<&str>) -> anyhow::Result<()> {
        let registry = self.registry();
        let now = self.clock.now();

        let Some(code) = code else {
            let records = registry.list()?;
            if records.is_empty() {
                writeln!(out, "No URLs shortened yet")?;
            }
            for record in &records {
                let stats = LinkStats::at(record, now);
                writeln!(
                    out,
                    "{}\t{}\tclicks={}\texpires={}{}",
                    stats.shortcode.to_url(&self.base_url),
                    stats.original_url,
                    stats.clicks,
                    stats.expiry_time,
                    if stats.expired { "\t(expired)" } else { "" }
                )?;
            }
            return Ok(());
        };

        let code = ShortCode::new_unchecked(code);
        let Some(record) = registry.find_by_shortcode(&code)? else {
            bail!("URL not found: {code}");
        };

        let stats = LinkStats::at(&record, now);
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        Ok(())
    }
}
