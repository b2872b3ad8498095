//! # Parser Registry
//!
//! The ordered catalog of block-start and inline parsers for one parse
//! session, plus a per-ASCII-char dispatch table built from the inline
//! parsers' lead chars. Immutable once built, so one registry can be
//! shared across threads.

use crate::parsing::{
    blocks::open::BlockParser,
    charset::CharSet,
    inline::{kinds::AutolinkParser, parser::InlineParser},
};

/// Which optional productions get registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub autolinks: bool,
    pub images: bool,
    pub reference_links: bool,
    /// Autolink schemes accepted on top of the built-in whitelist.
    pub extra_schemes: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            autolinks: true,
            images: true,
            reference_links: true,
            extra_schemes: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    block_parsers: Vec<BlockParser>,
    inline_parsers: Vec<InlineParser>,
    leads: Vec<CharSet>,
    /// Indices into `inline_parsers`, per ASCII char, in registry order.
    ascii_dispatch: Vec<Vec<usize>>,
    /// Parsers that may start on a non-ASCII char.
    non_ascii: Vec<usize>,
    significant: CharSet,
}

impl Registry {
    pub fn new(options: &ParserOptions) -> Self {
        let block_parsers = vec![BlockParser::FencedCode, BlockParser::BlockQuote];

        let mut inline_parsers = vec![InlineParser::Escape, InlineParser::Entity];
        if options.autolinks {
            inline_parsers.push(InlineParser::Autolink(AutolinkParser::new(
                &options.extra_schemes,
            )));
        }
        if options.images {
            inline_parsers.push(InlineParser::ImageReference);
        }
        if options.reference_links {
            inline_parsers.push(InlineParser::LinkReference);
        }

        Self::with_parsers(block_parsers, inline_parsers)
    }

    /// Builds a registry from explicit catalogs; order is priority.
    pub fn with_parsers(block_parsers: Vec<BlockParser>, inline_parsers: Vec<InlineParser>) -> Self {
        let leads: Vec<CharSet> = inline_parsers.iter().map(InlineParser::lead_chars).collect();

        let mut ascii_dispatch = vec![Vec::new(); 128];
        let mut non_ascii = Vec::new();
        for (index, lead) in leads.iter().enumerate() {
            for c in lead.ascii_members() {
                ascii_dispatch[c as usize].push(index);
            }
            if lead.has_non_ascii() {
                non_ascii.push(index);
            }
        }
        let significant = leads
            .iter()
            .fold(CharSet::empty(), |acc, lead| acc.union(lead));

        log::debug!(
            "registry: {} block parsers, {} inline parsers",
            block_parsers.len(),
            inline_parsers.len()
        );
        Self {
            block_parsers,
            inline_parsers,
            leads,
            ascii_dispatch,
            non_ascii,
            significant,
        }
    }

    pub fn block_parsers(&self) -> &[BlockParser] {
        &self.block_parsers
    }

    pub fn inline_parsers(&self) -> &[InlineParser] {
        &self.inline_parsers
    }

    /// The inline parsers that may start on `c`, in priority order.
    pub fn candidates(&self, c: char) -> impl Iterator<Item = &InlineParser> + '_ {
        let slots = if c.is_ascii() {
            &self.ascii_dispatch[c as usize]
        } else {
            &self.non_ascii
        };
        slots
            .iter()
            .filter(move |&&index| self.leads[index].contains(c))
            .map(move |&index| &self.inline_parsers[index])
    }

    /// Every char some inline parser may start on. The catch-all text run
    /// stops at these.
    pub fn significant_chars(&self) -> &CharSet {
        &self.significant
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&ParserOptions::default())
    }
}
