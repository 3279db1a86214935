//! Property tests: any token sequence yields a balanced event stream that
//! builds into a well-formed tree.

use proptest::prelude::*;
use wikiutil::model::{DocumentBuilder, Section};
use wikiutil::parser::Visitor;
use wikiutil::wem::{check_balance, EventRecorder};
use wikiutil::{Level, PropertyKind, Typeface, WikiParser};

#[derive(Debug, Clone)]
enum Token {
    Word(String),
    Space,
    Symbol(&'static str),
    HeadingStart(usize),
    HeadingEnd,
    ListEntry(usize, bool),
    ListEnd,
    Toggle(Typeface),
    StartTypeface(Typeface),
    EndTypeface(Typeface),
    TableRow,
    TableCell,
    Divider,
    NewLine,
    LineBreak,
    ParagraphBreak,
    Preformat,
    PreformatInline,
    Link(bool),
    BareLink,
    Image,
    Toc(&'static str),
    Property(PropertyKind),
}

fn typeface() -> impl Strategy<Value = Typeface> {
    prop_oneof![
        Just(Typeface::Bold),
        Just(Typeface::Italic),
        Just(Typeface::Code),
        Just(Typeface::Strikeout),
        Just(Typeface::Super),
        Just(Typeface::Sub),
    ]
}

fn token() -> impl Strategy<Value = Token> {
    prop_oneof![
        4 => "[A-Za-z]{1,8}".prop_map(Token::Word),
        3 => Just(Token::Space),
        1 => prop_oneof![Just("!"), Just("="), Just("."), Just("|")].prop_map(Token::Symbol),
        2 => (1usize..=6).prop_map(Token::HeadingStart),
        2 => Just(Token::HeadingEnd),
        3 => (0usize..8, any::<bool>()).prop_map(|(w, n)| Token::ListEntry(w, n)),
        1 => Just(Token::ListEnd),
        3 => typeface().prop_map(Token::Toggle),
        1 => typeface().prop_map(Token::StartTypeface),
        1 => typeface().prop_map(Token::EndTypeface),
        2 => Just(Token::TableRow),
        2 => Just(Token::TableCell),
        1 => Just(Token::Divider),
        2 => Just(Token::NewLine),
        1 => Just(Token::LineBreak),
        2 => Just(Token::ParagraphBreak),
        1 => Just(Token::Preformat),
        1 => Just(Token::PreformatInline),
        1 => any::<bool>().prop_map(Token::Link),
        1 => Just(Token::BareLink),
        1 => Just(Token::Image),
        1 => prop_oneof![Just("3"), Just("0"), Just("x")].prop_map(Token::Toc),
        1 => prop_oneof![
            Just(PropertyKind::Summary),
            Just(PropertyKind::Sidebar),
            Just(PropertyKind::Labels)
        ]
        .prop_map(Token::Property),
    ]
}

fn drive<W: wikiutil::WikiEventModel>(visitor: &mut Visitor<W>, tokens: &[Token]) {
    for (line, token) in tokens.iter().enumerate() {
        visitor.set_line(line + 1);
        match token {
            Token::Word(word) => visitor.on_word(word),
            Token::Space => visitor.on_space(" "),
            Token::Symbol(symbol) => visitor.on_special_symbol(symbol),
            Token::HeadingStart(depth) => {
                visitor.on_heading_start(Level::from_depth(*depth).unwrap_or(Level::H1))
            }
            Token::HeadingEnd => visitor.on_heading_end(),
            Token::ListEntry(width, numbered) => {
                let marker = format!(
                    "{}{}",
                    " ".repeat(*width),
                    if *numbered { "#" } else { "*" }
                );
                visitor.on_list_entry_start(&marker, *numbered)
            }
            Token::ListEnd => visitor.on_list_entries_end(),
            Token::Toggle(kind) => visitor.on_typeface_toggle(*kind),
            Token::StartTypeface(kind) => visitor.start_typeface(*kind),
            Token::EndTypeface(kind) => visitor.end_typeface(*kind),
            Token::TableRow => visitor.on_table_row(),
            Token::TableCell => visitor.on_table_cell(),
            Token::Divider => visitor.on_divider(),
            Token::NewLine => visitor.on_new_line(),
            Token::LineBreak => visitor.on_line_break(),
            Token::ParagraphBreak => visitor.on_paragraph_break(),
            Token::Preformat => visitor.on_preformat("let x = 1;"),
            Token::PreformatInline => visitor.on_preformat_inline("x"),
            Token::Link(described) => {
                visitor.on_link("PageName", described.then_some("the page"))
            }
            Token::BareLink => visitor.on_bare_link("http://example.org/"),
            Token::Image => visitor.on_image("http://example.org/i.png"),
            Token::Toc(depth) => visitor.on_table_of_contents(depth),
            Token::Property(kind) => visitor.on_property(*kind, "a, b"),
        }
    }
}

fn assert_depths(section: &Section) {
    for child in &section.sections {
        assert_eq!(child.depth, section.depth + 1);
        assert_depths(child);
    }
}

proptest! {
    #[test]
    fn events_are_balanced(tokens in prop::collection::vec(token(), 0..80)) {
        let mut visitor = Visitor::new(EventRecorder::new());
        drive(&mut visitor, &tokens);
        let (recorder, _) = visitor.finish().unwrap();
        prop_assert!(check_balance(recorder.events()).is_ok());
    }

    #[test]
    fn tree_is_well_formed(tokens in prop::collection::vec(token(), 0..80)) {
        let mut visitor = Visitor::new(DocumentBuilder::new());
        drive(&mut visitor, &tokens);
        let (builder, _) = visitor.finish().unwrap();
        let doc = builder.finish();
        prop_assert!(doc.is_ok(), "builder rejected stream: {:?}", doc.err());
        assert_depths(&doc.unwrap().root);
    }

    #[test]
    fn any_text_parses(source in "[ a-zA-Z=*_#|\\[\\]{}`~,^\n-]{0,200}") {
        let mut recorder = EventRecorder::new();
        WikiParser::from_text(source.clone()).parse_into(&mut recorder).unwrap();
        prop_assert!(check_balance(recorder.events()).is_ok());
        prop_assert!(WikiParser::from_text(source).parse().is_ok());
    }
}
