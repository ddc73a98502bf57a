//! Element namespaces and tag classification.
//!
//! Tag names are classified into `TagKind` once, when an element is created.
//! After that, checking what an element is costs one enum compare — filters
//! never re-examine the tag string for well-known tags.

/// XML/HTML namespace for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
    /// HTML namespace (default)
    #[default]
    Html,
    /// SVG namespace
    Svg,
    /// MathML namespace
    MathMl,
    /// Generic XML
    Xml,
}

impl Namespace {
    /// Returns the namespace URI.
    pub fn uri(&self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
            Namespace::Xml => "http://www.w3.org/XML/1998/namespace",
        }
    }

    /// Classify a namespace URI. Unrecognized URIs map to `Xml`.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            "http://www.w3.org/1999/xhtml" => Namespace::Html,
            "http://www.w3.org/2000/svg" => Namespace::Svg,
            "http://www.w3.org/1998/Math/MathML" => Namespace::MathMl,
            _ => Namespace::Xml,
        }
    }
}

macro_rules! known_tags {
    ($($name:literal => $variant:ident,)+) => {
        /// Closed set of well-known HTML tags, plus `Unknown` for everything
        /// else (custom elements, foreign content, typos browsers tolerate).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TagKind {
            $($variant,)+
            /// Not a well-known HTML tag. The element keeps its name string.
            Unknown,
        }

        impl TagKind {
            /// Classify a lowercase tag name.
            pub fn from_name(name: &str) -> TagKind {
                match name {
                    $($name => TagKind::$variant,)+
                    _ => TagKind::Unknown,
                }
            }

            /// The canonical tag name, or `None` for `Unknown`.
            pub fn as_str(&self) -> Option<&'static str> {
                match self {
                    $(TagKind::$variant => Some($name),)+
                    TagKind::Unknown => None,
                }
            }
        }
    };
}

known_tags! {
    "a" => A,
    "abbr" => Abbr,
    "address" => Address,
    "area" => Area,
    "article" => Article,
    "aside" => Aside,
    "audio" => Audio,
    "b" => B,
    "base" => Base,
    "bdi" => Bdi,
    "bdo" => Bdo,
    "blockquote" => Blockquote,
    "body" => Body,
    "br" => Br,
    "button" => Button,
    "canvas" => Canvas,
    "caption" => Caption,
    "cite" => Cite,
    "code" => Code,
    "col" => Col,
    "colgroup" => Colgroup,
    "data" => Data,
    "datalist" => Datalist,
    "dd" => Dd,
    "del" => Del,
    "details" => Details,
    "dfn" => Dfn,
    "dialog" => Dialog,
    "div" => Div,
    "dl" => Dl,
    "dt" => Dt,
    "em" => Em,
    "embed" => Embed,
    "fieldset" => Fieldset,
    "figcaption" => Figcaption,
    "figure" => Figure,
    "footer" => Footer,
    "form" => Form,
    "h1" => H1,
    "h2" => H2,
    "h3" => H3,
    "h4" => H4,
    "h5" => H5,
    "h6" => H6,
    "head" => Head,
    "header" => Header,
    "hgroup" => Hgroup,
    "hr" => Hr,
    "html" => Html,
    "i" => I,
    "iframe" => Iframe,
    "img" => Img,
    "input" => Input,
    "ins" => Ins,
    "kbd" => Kbd,
    "label" => Label,
    "legend" => Legend,
    "li" => Li,
    "link" => Link,
    "main" => Main,
    "map" => Map,
    "mark" => Mark,
    "menu" => Menu,
    "meta" => Meta,
    "meter" => Meter,
    "nav" => Nav,
    "noscript" => Noscript,
    "object" => Object,
    "ol" => Ol,
    "optgroup" => Optgroup,
    "option" => Option,
    "output" => Output,
    "p" => P,
    "param" => Param,
    "picture" => Picture,
    "pre" => Pre,
    "progress" => Progress,
    "q" => Q,
    "rp" => Rp,
    "rt" => Rt,
    "ruby" => Ruby,
    "s" => S,
    "samp" => Samp,
    "script" => Script,
    "section" => Section,
    "select" => Select,
    "slot" => Slot,
    "small" => Small,
    "source" => Source,
    "span" => Span,
    "strong" => Strong,
    "style" => Style,
    "sub" => Sub,
    "summary" => Summary,
    "sup" => Sup,
    "table" => Table,
    "tbody" => Tbody,
    "td" => Td,
    "template" => Template,
    "textarea" => Textarea,
    "tfoot" => Tfoot,
    "th" => Th,
    "thead" => Thead,
    "time" => Time,
    "title" => Title,
    "tr" => Tr,
    "track" => Track,
    "u" => U,
    "ul" => Ul,
    "var" => Var,
    "video" => Video,
    "wbr" => Wbr,
}

impl TagKind {
    /// HTML5 void elements never have closing tags or children.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            TagKind::Area
                | TagKind::Base
                | TagKind::Br
                | TagKind::Col
                | TagKind::Embed
                | TagKind::Hr
                | TagKind::Img
                | TagKind::Input
                | TagKind::Link
                | TagKind::Meta
                | TagKind::Param
                | TagKind::Source
                | TagKind::Track
                | TagKind::Wbr
        )
    }

    /// Form-associated listed elements — the ones `form.elements` exposes.
    pub fn is_listed_control(&self) -> bool {
        matches!(
            self,
            TagKind::Button
                | TagKind::Fieldset
                | TagKind::Input
                | TagKind::Object
                | TagKind::Output
                | TagKind::Select
                | TagKind::Textarea
        )
    }

    /// Raw-text elements whose content is never escaped on serialization.
    pub fn is_raw_text(&self) -> bool {
        matches!(self, TagKind::Script | TagKind::Style)
    }

    /// RCDATA elements: only `&` and `<` are escaped in their content.
    pub fn is_rcdata(&self) -> bool {
        matches!(self, TagKind::Title | TagKind::Textarea)
    }
}
