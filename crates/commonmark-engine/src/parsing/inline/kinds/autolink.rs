use std::collections::HashSet;
use std::sync::OnceLock;

use crate::parsing::{
    charset::CharSet,
    cursor::Cursor,
    inline::{
        kinds::{AllParser, CompositeInlineParser},
        parser::{InlineContext, InlineParser},
        types::{InlineNode, Link, LinkDestination, LinkLabel, LinkTitle, Text, plain_text, push_merged},
    },
    rope::span::Span,
};

pub const LEAD: &str = "<";

/// Longest scheme looked up in the whitelist.
const MAX_SCHEME_LEN: usize = 32;

/// Registered URI schemes recognised inside `<...>`. Matched
/// case-insensitively.
pub const SCHEMES: &[&str] = &[
    "coap", "doi", "javascript", "aaa", "aaas", "about", "acap", "cap", "cid",
    "crid", "data", "dav", "dict", "dns", "file", "ftp", "geo", "go", "gopher",
    "h323", "http", "https", "iax", "icap", "im", "imap", "info", "ipp", "iris",
    "iris.beep", "iris.xpc", "iris.xpcs", "iris.lwz", "ldap", "mailto", "mid",
    "msrp", "msrps", "mtqp", "mupdate", "news", "nfs", "ni", "nih", "nntp",
    "opaquelocktoken", "pop", "pres", "rtsp", "service", "session", "shttp",
    "sieve", "sip", "sips", "sms", "snmp", "soap.beep", "soap.beeps", "tag",
    "tel", "telnet", "tftp", "thismessage", "tn3270", "tip", "tv", "urn", "vemmi",
    "ws", "wss", "xcon", "xcon-userid", "xmlrpc.beep", "xmlrpc.beeps", "xmpp",
    "z39.50r", "z39.50s", "adiumxtra", "afp", "afs", "aim", "apt", "attachment",
    "aw", "beshare", "bitcoin", "bolo", "callto", "chrome", "chrome-extension",
    "com-eventbrite-attendee", "content", "cvs", "dlna-playsingle",
    "dlna-playcontainer", "dtn", "dvb", "ed2k", "facetime", "feed", "finger",
    "fish", "gg", "git", "gizmoproject", "gtalk", "hcp", "icon", "ipn", "irc",
    "irc6", "ircs", "itms", "jar", "jms", "keyparc", "lastfm", "ldaps", "magnet",
    "maps", "market", "message", "mms", "ms-help", "msnim", "mumble", "mvn", "notes",
    "oid", "palm", "paparazzi", "platform", "proxy", "psyc", "query", "res", "resource",
    "rmi", "rsync", "rtmp", "secondlife", "sftp", "sgn", "skype", "smb", "soldat",
    "spotify", "ssh", "steam", "svn", "teamspeak", "things", "udp", "unreal", "ut2004",
    "ventrilo", "view-source", "webcal", "wtai", "wyciwyg", "xfire", "xri", "ymsgr",
];

/// `<scheme:body>` autolinks.
///
/// The whole match is one speculative attempt: either a complete link is
/// returned or the cursor is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutolinkParser {
    /// Schemes accepted on top of [`SCHEMES`], lowercase.
    pub extra_schemes: Vec<String>,
}

impl AutolinkParser {
    pub fn new(extra_schemes: &[String]) -> Self {
        Self {
            extra_schemes: extra_schemes.iter().map(|s| s.to_ascii_lowercase()).collect(),
        }
    }

    pub fn is_known_scheme(&self, scheme: &str) -> bool {
        let scheme = scheme.to_ascii_lowercase();
        whitelist().contains(scheme.as_str()) || self.extra_schemes.contains(&scheme)
    }

    pub fn parse(&self, ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<InlineNode> {
        if cursor.current_char() != '<' {
            return None;
        }
        let saved = cursor.save();
        let start = cursor.pos();
        cursor.advance(1);

        let scheme_start = cursor.pos();
        let scheme = cursor.take_while_max(is_scheme_char, MAX_SCHEME_LEN + 1);
        if scheme.len() <= MAX_SCHEME_LEN
            && cursor.current_char() == ':'
            && self.is_known_scheme(scheme)
        {
            cursor.advance(1);
            let scheme_node = InlineNode::Text(Text::new(
                Span::new(scheme_start, cursor.pos()),
                format!("{scheme}:"),
            ));
            let body = uri_body().parse_many(ctx, cursor);
            if cursor.current_char() == '>' && !body.is_empty() {
                cursor.advance(1);
                let mut inlines = vec![scheme_node];
                for node in body {
                    push_merged(&mut inlines, node);
                }
                let uri = plain_text(&inlines);
                return Some(InlineNode::Link(Link {
                    span: Span::new(start, cursor.pos()),
                    label: LinkLabel {
                        text: uri.clone(),
                        inlines,
                    },
                    destination: LinkDestination::new(uri),
                    title: LinkTitle::default(),
                }));
            }
        }

        saved.restore(cursor);
        None
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')
}

fn whitelist() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| SCHEMES.iter().copied().collect())
}

/// Entity, or a run of chars that are neither control chars nor `<`/`>`
/// (nor `&`, so an entity gets its chance), or a lone `&`.
fn uri_body() -> &'static InlineParser {
    static PARSER: OnceLock<InlineParser> = OnceLock::new();
    PARSER.get_or_init(|| {
        let forbidden = CharSet::control().union(&CharSet::of("<>"));
        InlineParser::Composite(CompositeInlineParser::new(vec![
            InlineParser::Entity,
            InlineParser::All(AllParser::except(&forbidden.union(&CharSet::of("&")))),
            InlineParser::All(AllParser::with_max(CharSet::of("&"), 1)),
        ]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{references::ReferenceMap, registry::Registry};
    use rstest::rstest;

    fn run(parser: &AutolinkParser, input: &str) -> (Option<InlineNode>, usize) {
        let registry = Registry::default();
        let refs = ReferenceMap::new();
        let ctx = InlineContext::new(&registry, &refs);
        let mut cur = Cursor::new(input);
        let node = parser.parse(&ctx, &mut cur);
        (node, cur.position())
    }

    fn link_of(node: Option<InlineNode>) -> Link {
        match node {
            Some(InlineNode::Link(link)) => link,
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn accepts_http_link() {
        let (node, pos) = run(&AutolinkParser::default(), "<http://example.com>");
        let link = link_of(node);
        assert_eq!(link.label.text, "http://example.com");
        assert_eq!(link.destination.url, "http://example.com");
        assert!(link.title.is_empty());
        assert_eq!(link.span, Span::new(0, 20));
        assert_eq!(pos, 20);
    }

    #[rstest]
    #[case("<MAILTO:foo@bar.example>", "MAILTO:foo@bar.example")]
    #[case("<irc://foo.bar:2233/baz>", "irc://foo.bar:2233/baz")]
    #[case("<http://a&amp;b>", "http://a&b")]
    #[case("<http://a&b>", "http://a&b")]
    #[case("<view-source:x>", "view-source:x")]
    fn accepts(#[case] input: &str, #[case] uri: &str) {
        let (node, pos) = run(&AutolinkParser::default(), input);
        assert_eq!(link_of(node).destination.url, uri);
        assert_eq!(pos, input.len());
    }

    #[rstest]
    #[case("<foo:bar>")]
    #[case("<http://a<b>")]
    #[case("<http://a b>")]
    #[case("<http:>")]
    #[case("<http://unclosed")]
    #[case("<>")]
    #[case("<http\n://x>")]
    #[case("<ht_tp:x>")]
    #[case("http://x>")]
    fn rejects_and_restores(#[case] input: &str) {
        let (node, pos) = run(&AutolinkParser::default(), input);
        assert_eq!(node, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn extra_schemes_extend_the_whitelist() {
        let parser = AutolinkParser::new(&["Foo".to_string()]);
        let (node, _) = run(&parser, "<foo:bar>");
        assert_eq!(link_of(node).destination.url, "foo:bar");
    }

    #[test]
    fn schemes_longer_than_the_bound_are_rejected() {
        let long = "a".repeat(MAX_SCHEME_LEN + 1);
        let parser = AutolinkParser::new(std::slice::from_ref(&long));
        let (node, pos) = run(&parser, &format!("<{long}:x>"));
        assert_eq!(node, None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn label_inlines_cover_scheme_and_body() {
        let (node, _) = run(&AutolinkParser::default(), "<http://a&amp;b>");
        let link = link_of(node);
        assert_eq!(link.label.inlines.len(), 1);
        assert_eq!(link.label.inlines[0].span(), Span::new(1, 15));
    }
}
