use crate::modelica::lexer::{keyword, tokenize, Lexeme, Token};
use crate::tree::{ParseError, SourceParser, SyntaxTree, TreeBuilder};

type PResult = Result<(), ParseError>;

/// Recursive-descent parser for the Modelica subset used by component models.
///
/// Every node is labelled with a field equal to its own rule name, so a
/// `declaration` exposes its identifier as field `IDENT` and a
/// `connect_clause` exposes both endpoints as field `component_reference`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelicaParser;

impl ModelicaParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for ModelicaParser {
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
        };
        parser.stored_definition()?;
        parser.builder.finish(source)
    }
}

const CLASS_KEYWORDS: &[&str] = &[
    "encapsulated",
    "partial",
    "class",
    "model",
    "block",
    "type",
    "package",
    "record",
    "connector",
    "expandable",
    "operator",
    "function",
    "pure",
    "impure",
];

const TYPE_PREFIXES: &[&str] = &[
    "flow",
    "stream",
    "discrete",
    "parameter",
    "constant",
    "input",
    "output",
];

const ELEMENT_PREFIXES: &[&str] = &[
    "import",
    "extends",
    "redeclare",
    "final",
    "inner",
    "outer",
    "replaceable",
];

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Lexeme>,
    pos: usize,
    builder: TreeBuilder,
}

impl<'s> Parser<'s> {
    // ---- token plumbing ----

    fn nth(&self, n: usize) -> Option<Lexeme> {
        self.tokens.get(self.pos + n).copied()
    }

    fn text(&self, lexeme: Lexeme) -> &'s str {
        &self.source[lexeme.span.range()]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Keyword or punctuation `lit` at lookahead `n`.
    fn nth_is(&self, n: usize, lit: &str) -> bool {
        match self.nth(n) {
            Some(lexeme) => match lexeme.token {
                Token::Ident => self.text(lexeme) == lit && keyword(lit).is_some(),
                Token::String | Token::UnsignedNumber => false,
                token => token.literal() == Some(lit),
            },
            None => false,
        }
    }

    fn at(&self, lit: &str) -> bool {
        self.nth_is(0, lit)
    }

    fn at_any(&self, lits: &[&str]) -> bool {
        lits.iter().any(|lit| self.at(lit))
    }

    fn nth_is_ident(&self, n: usize) -> bool {
        self.nth(n)
            .is_some_and(|l| l.token == Token::Ident && keyword(self.text(l)).is_none())
    }

    fn at_ident(&self) -> bool {
        self.nth_is_ident(0)
    }

    fn at_token(&self, token: Token) -> bool {
        self.nth(0).is_some_and(|l| l.token == token)
    }

    /// Consume the next token as a terminal node.
    fn bump(&mut self) {
        let Some(lexeme) = self.nth(0) else {
            return;
        };
        let rule = match lexeme.token {
            Token::Ident => keyword(self.text(lexeme)).unwrap_or("IDENT"),
            Token::String => "STRING",
            Token::UnsignedNumber => "UNSIGNED_NUMBER",
            token => token.literal().unwrap_or("?"),
        };
        self.builder.token(rule, Some(rule), lexeme.span);
        self.pos += 1;
    }

    fn eat(&mut self, lit: &str) -> bool {
        let found = self.at(lit);
        if found {
            self.bump();
        }
        found
    }

    fn error(&self, expected: &str) -> ParseError {
        match self.nth(0) {
            Some(lexeme) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.text(lexeme).to_string(),
                offset: lexeme.span.start,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    fn expect(&mut self, lit: &str) -> PResult {
        if self.eat(lit) {
            Ok(())
        } else {
            Err(self.error(&format!("'{lit}'")))
        }
    }

    fn ident(&mut self) -> Result<&'s str, ParseError> {
        match self.nth(0) {
            Some(lexeme) if self.at_ident() => {
                self.bump();
                Ok(self.text(lexeme))
            }
            _ => Err(self.error("identifier")),
        }
    }

    fn node(&mut self, rule: &'static str, body: impl FnOnce(&mut Self) -> PResult) -> PResult {
        self.builder.start_node(rule, Some(rule));
        body(self)?;
        self.builder.finish_node();
        Ok(())
    }

    fn starts_class_definition(&self) -> bool {
        self.at_any(CLASS_KEYWORDS)
    }

    fn starts_element(&self) -> bool {
        self.at_ident()
            || self.at(".")
            || self.at_any(ELEMENT_PREFIXES)
            || self.at_any(TYPE_PREFIXES)
            || self.starts_class_definition()
    }

    fn starts_section(&self) -> bool {
        self.at_any(&["public", "protected", "equation", "algorithm", "external"])
            || (self.at("initial") && (self.nth_is(1, "equation") || self.nth_is(1, "algorithm")))
    }

    // ---- classes ----

    fn stored_definition(&mut self) -> PResult {
        self.node("stored_definition", |p| {
            if p.eat("within") {
                if !p.at(";") {
                    p.name()?;
                }
                p.expect(";")?;
            }
            while !p.at_eof() {
                p.eat("final");
                p.class_definition()?;
                p.expect(";")?;
            }
            Ok(())
        })
    }

    fn class_definition(&mut self) -> PResult {
        self.node("class_definition", |p| {
            p.eat("encapsulated");
            p.class_prefixes()?;
            p.class_specifier()
        })
    }

    fn class_prefixes(&mut self) -> PResult {
        self.node("class_prefixes", |p| {
            p.eat("partial");
            for kw in ["class", "model", "block", "type", "package", "record", "connector"] {
                if p.eat(kw) {
                    return Ok(());
                }
            }
            if p.eat("expandable") {
                return p.expect("connector");
            }
            if p.eat("operator") {
                if !p.eat("record") {
                    p.eat("function");
                }
                return Ok(());
            }
            if !p.eat("pure") {
                p.eat("impure");
            }
            p.eat("operator");
            p.expect("function")
        })
    }

    fn class_specifier(&mut self) -> PResult {
        self.node("class_specifier", |p| {
            if !p.at("extends") && p.nth_is(1, "=") {
                p.short_class_specifier()
            } else {
                p.long_class_specifier()
            }
        })
    }

    fn long_class_specifier(&mut self) -> PResult {
        self.node("long_class_specifier", |p| {
            let name = if p.eat("extends") {
                let name = p.ident()?;
                if p.at("(") {
                    p.class_modification()?;
                }
                name
            } else {
                p.ident()?
            };
            p.string_comment()?;
            p.composition()?;
            p.expect("end")?;
            let offset = p.nth(0).map(|l| l.span.start);
            let closing = p.ident()?;
            if closing != name {
                return Err(ParseError::UnexpectedToken {
                    expected: format!("'{name}'"),
                    found: closing.to_string(),
                    offset: offset.unwrap_or_default(),
                });
            }
            Ok(())
        })
    }

    fn short_class_specifier(&mut self) -> PResult {
        self.node("short_class_specifier", |p| {
            p.ident()?;
            p.expect("=")?;
            if p.eat("enumeration") {
                p.expect("(")?;
                if !p.eat(":") && !p.at(")") {
                    p.enum_list()?;
                }
                p.expect(")")?;
            } else {
                p.type_prefix()?;
                p.type_specifier()?;
                if p.at("[") {
                    p.array_subscripts()?;
                }
                if p.at("(") {
                    p.class_modification()?;
                }
            }
            p.comment()
        })
    }

    fn enum_list(&mut self) -> PResult {
        self.node("enum_list", |p| loop {
            p.node("enumeration_literal", |p| {
                p.ident()?;
                p.comment()
            })?;
            if !p.eat(",") {
                return Ok(());
            }
        })
    }

    fn composition(&mut self) -> PResult {
        self.node("composition", |p| {
            p.element_list()?;
            loop {
                if p.eat("public") || p.eat("protected") {
                    p.element_list()?;
                } else if p.at("equation") || (p.at("initial") && p.nth_is(1, "equation")) {
                    p.equation_section()?;
                } else if p.at("algorithm") || (p.at("initial") && p.nth_is(1, "algorithm")) {
                    p.algorithm_section()?;
                } else {
                    break;
                }
            }
            if p.at("annotation") {
                p.annotation()?;
                p.expect(";")?;
            }
            Ok(())
        })
    }

    fn element_list(&mut self) -> PResult {
        self.node("element_list", |p| {
            while p.starts_element() {
                p.element()?;
                p.expect(";")?;
            }
            Ok(())
        })
    }

    fn element(&mut self) -> PResult {
        self.node("element", |p| {
            if p.at("import") {
                return p.import_clause();
            }
            if p.at("extends") {
                return p.extends_clause();
            }
            p.eat("redeclare");
            p.eat("final");
            p.eat("inner");
            p.eat("outer");
            let replaceable = p.eat("replaceable");
            if p.starts_class_definition() {
                p.class_definition()?;
            } else {
                p.component_clause()?;
            }
            if replaceable && p.at("constrainedby") {
                p.constraining_clause()?;
                p.comment()?;
            }
            Ok(())
        })
    }

    fn import_clause(&mut self) -> PResult {
        self.node("import_clause", |p| {
            p.expect("import")?;
            if p.at_ident() && p.nth_is(1, "=") {
                p.ident()?;
                p.bump();
            }
            p.name()?;
            p.eat(".*");
            p.comment()
        })
    }

    fn extends_clause(&mut self) -> PResult {
        self.node("extends_clause", |p| {
            p.expect("extends")?;
            p.type_specifier()?;
            if p.at("(") {
                p.class_modification()?;
            }
            if p.at("annotation") {
                p.annotation()?;
            }
            Ok(())
        })
    }

    fn constraining_clause(&mut self) -> PResult {
        self.node("constraining_clause", |p| {
            p.expect("constrainedby")?;
            p.type_specifier()?;
            if p.at("(") {
                p.class_modification()?;
            }
            Ok(())
        })
    }

    // ---- components ----

    fn component_clause(&mut self) -> PResult {
        self.node("component_clause", |p| {
            p.type_prefix()?;
            p.type_specifier()?;
            if p.at("[") {
                p.array_subscripts()?;
            }
            p.component_list()
        })
    }

    fn type_prefix(&mut self) -> PResult {
        self.node("type_prefix", |p| {
            if !p.eat("flow") {
                p.eat("stream");
            }
            let _ = p.eat("discrete") || p.eat("parameter") || p.eat("constant");
            if !p.eat("input") {
                p.eat("output");
            }
            Ok(())
        })
    }

    fn type_specifier(&mut self) -> PResult {
        self.node("type_specifier", |p| p.name())
    }

    fn component_list(&mut self) -> PResult {
        self.node("component_list", |p| loop {
            p.component_declaration()?;
            if !p.eat(",") {
                return Ok(());
            }
        })
    }

    fn component_declaration(&mut self) -> PResult {
        self.node("component_declaration", |p| {
            p.declaration()?;
            if p.at("if") {
                p.node("condition_attribute", |p| {
                    p.bump();
                    p.expression()
                })?;
            }
            p.comment()
        })
    }

    fn declaration(&mut self) -> PResult {
        self.node("declaration", |p| {
            p.ident()?;
            if p.at("[") {
                p.array_subscripts()?;
            }
            if p.at_any(&["(", "=", ":="]) {
                p.modification()?;
            }
            Ok(())
        })
    }

    fn modification(&mut self) -> PResult {
        self.node("modification", |p| {
            if p.at("(") {
                p.class_modification()?;
                if p.eat("=") {
                    p.expression()?;
                }
                Ok(())
            } else if p.eat("=") || p.eat(":=") {
                p.expression()
            } else {
                Err(p.error("modification"))
            }
        })
    }

    fn class_modification(&mut self) -> PResult {
        self.node("class_modification", |p| {
            p.expect("(")?;
            if !p.at(")") {
                p.argument_list()?;
            }
            p.expect(")")
        })
    }

    fn argument_list(&mut self) -> PResult {
        self.node("argument_list", |p| loop {
            p.argument()?;
            if !p.eat(",") {
                return Ok(());
            }
        })
    }

    fn argument(&mut self) -> PResult {
        self.node("argument", |p| {
            if p.at("redeclare") {
                p.element_redeclaration()
            } else {
                p.element_modification_or_replaceable()
            }
        })
    }

    fn element_modification_or_replaceable(&mut self) -> PResult {
        self.node("element_modification_or_replaceable", |p| {
            p.eat("each");
            p.eat("final");
            if p.at("replaceable") {
                p.element_replaceable()
            } else {
                p.element_modification()
            }
        })
    }

    fn element_modification(&mut self) -> PResult {
        self.node("element_modification", |p| {
            p.name()?;
            if p.at_any(&["(", "=", ":="]) {
                p.modification()?;
            }
            p.string_comment()
        })
    }

    fn element_redeclaration(&mut self) -> PResult {
        self.node("element_redeclaration", |p| {
            p.expect("redeclare")?;
            p.eat("each");
            p.eat("final");
            if p.at("replaceable") {
                p.element_replaceable()
            } else {
                p.component_clause1()
            }
        })
    }

    fn element_replaceable(&mut self) -> PResult {
        self.node("element_replaceable", |p| {
            p.expect("replaceable")?;
            p.component_clause1()?;
            if p.at("constrainedby") {
                p.constraining_clause()?;
            }
            Ok(())
        })
    }

    fn component_clause1(&mut self) -> PResult {
        self.node("component_clause1", |p| {
            p.type_prefix()?;
            p.type_specifier()?;
            p.node("component_declaration1", |p| {
                p.declaration()?;
                p.comment()
            })
        })
    }

    fn array_subscripts(&mut self) -> PResult {
        self.node("array_subscripts", |p| {
            p.expect("[")?;
            loop {
                p.node("subscript", |p| {
                    if p.eat(":") {
                        Ok(())
                    } else {
                        p.expression()
                    }
                })?;
                if !p.eat(",") {
                    break;
                }
            }
            p.expect("]")
        })
    }

    // ---- equations and algorithms ----

    fn equation_section(&mut self) -> PResult {
        self.node("equation_section", |p| {
            p.eat("initial");
            p.expect("equation")?;
            while !p.at_eof() && !p.starts_section() && !p.at_any(&["end", "annotation"]) {
                p.equation()?;
                p.expect(";")?;
            }
            Ok(())
        })
    }

    fn algorithm_section(&mut self) -> PResult {
        self.node("algorithm_section", |p| {
            p.eat("initial");
            p.expect("algorithm")?;
            while !p.at_eof() && !p.starts_section() && !p.at_any(&["end", "annotation"]) {
                p.statement()?;
                p.expect(";")?;
            }
            Ok(())
        })
    }

    fn equations_until(&mut self, stops: &[&str]) -> PResult {
        while !self.at_eof() && !self.at_any(stops) {
            self.equation()?;
            self.expect(";")?;
        }
        Ok(())
    }

    fn statements_until(&mut self, stops: &[&str]) -> PResult {
        while !self.at_eof() && !self.at_any(stops) {
            self.statement()?;
            self.expect(";")?;
        }
        Ok(())
    }

    fn equation(&mut self) -> PResult {
        self.node("equation", |p| {
            if p.at("if") {
                p.if_equation()?;
            } else if p.at("for") {
                p.for_equation()?;
            } else if p.at("connect") {
                p.connect_clause()?;
            } else if p.at("when") {
                p.when_equation()?;
            } else {
                p.simple_expression()?;
                if p.eat("=") {
                    p.expression()?;
                }
            }
            p.comment()
        })
    }

    fn if_equation(&mut self) -> PResult {
        self.node("if_equation", |p| {
            p.expect("if")?;
            p.expression()?;
            p.expect("then")?;
            p.equations_until(&["elseif", "else", "end"])?;
            while p.eat("elseif") {
                p.expression()?;
                p.expect("then")?;
                p.equations_until(&["elseif", "else", "end"])?;
            }
            if p.eat("else") {
                p.equations_until(&["end"])?;
            }
            p.expect("end")?;
            p.expect("if")
        })
    }

    fn for_equation(&mut self) -> PResult {
        self.node("for_equation", |p| {
            p.expect("for")?;
            p.for_indices()?;
            p.expect("loop")?;
            p.equations_until(&["end"])?;
            p.expect("end")?;
            p.expect("for")
        })
    }

    fn when_equation(&mut self) -> PResult {
        self.node("when_equation", |p| {
            p.expect("when")?;
            p.expression()?;
            p.expect("then")?;
            p.equations_until(&["elsewhen", "end"])?;
            while p.eat("elsewhen") {
                p.expression()?;
                p.expect("then")?;
                p.equations_until(&["elsewhen", "end"])?;
            }
            p.expect("end")?;
            p.expect("when")
        })
    }

    fn statement(&mut self) -> PResult {
        self.node("statement", |p| {
            if p.at("if") {
                p.if_statement()?;
            } else if p.at("for") {
                p.for_statement()?;
            } else if p.at("while") {
                p.while_statement()?;
            } else if p.at("when") {
                p.when_statement()?;
            } else if p.eat("break") || p.eat("return") {
            } else if p.eat("(") {
                p.output_expression_list()?;
                p.expect(")")?;
                p.expect(":=")?;
                p.component_reference()?;
                p.function_call_args()?;
            } else {
                p.component_reference()?;
                if p.eat(":=") {
                    p.expression()?;
                } else {
                    p.function_call_args()?;
                }
            }
            p.comment()
        })
    }

    fn if_statement(&mut self) -> PResult {
        self.node("if_statement", |p| {
            p.expect("if")?;
            p.expression()?;
            p.expect("then")?;
            p.statements_until(&["elseif", "else", "end"])?;
            while p.eat("elseif") {
                p.expression()?;
                p.expect("then")?;
                p.statements_until(&["elseif", "else", "end"])?;
            }
            if p.eat("else") {
                p.statements_until(&["end"])?;
            }
            p.expect("end")?;
            p.expect("if")
        })
    }

    fn for_statement(&mut self) -> PResult {
        self.node("for_statement", |p| {
            p.expect("for")?;
            p.for_indices()?;
            p.expect("loop")?;
            p.statements_until(&["end"])?;
            p.expect("end")?;
            p.expect("for")
        })
    }

    fn while_statement(&mut self) -> PResult {
        self.node("while_statement", |p| {
            p.expect("while")?;
            p.expression()?;
            p.expect("loop")?;
            p.statements_until(&["end"])?;
            p.expect("end")?;
            p.expect("while")
        })
    }

    fn when_statement(&mut self) -> PResult {
        self.node("when_statement", |p| {
            p.expect("when")?;
            p.expression()?;
            p.expect("then")?;
            p.statements_until(&["elsewhen", "end"])?;
            while p.eat("elsewhen") {
                p.expression()?;
                p.expect("then")?;
                p.statements_until(&["elsewhen", "end"])?;
            }
            p.expect("end")?;
            p.expect("when")
        })
    }

    fn for_indices(&mut self) -> PResult {
        self.node("for_indices", |p| loop {
            p.node("for_index", |p| {
                p.ident()?;
                if p.eat("in") {
                    p.expression()?;
                }
                Ok(())
            })?;
            if !p.eat(",") {
                return Ok(());
            }
        })
    }

    fn connect_clause(&mut self) -> PResult {
        self.node("connect_clause", |p| {
            p.expect("connect")?;
            p.expect("(")?;
            p.component_reference()?;
            p.expect(",")?;
            p.component_reference()?;
            p.expect(")")
        })
    }

    // ---- expressions ----

    fn expression(&mut self) -> PResult {
        self.node("expression", |p| {
            if p.eat("if") {
                p.expression()?;
                p.expect("then")?;
                p.expression()?;
                while p.eat("elseif") {
                    p.expression()?;
                    p.expect("then")?;
                    p.expression()?;
                }
                p.expect("else")?;
                p.expression()
            } else {
                p.simple_expression()
            }
        })
    }

    fn simple_expression(&mut self) -> PResult {
        self.node("simple_expression", |p| {
            p.logical_expression()?;
            if p.eat(":") {
                p.logical_expression()?;
                if p.eat(":") {
                    p.logical_expression()?;
                }
            }
            Ok(())
        })
    }

    fn logical_expression(&mut self) -> PResult {
        self.node("logical_expression", |p| {
            p.logical_term()?;
            while p.eat("or") {
                p.logical_term()?;
            }
            Ok(())
        })
    }

    fn logical_term(&mut self) -> PResult {
        self.node("logical_term", |p| {
            p.logical_factor()?;
            while p.eat("and") {
                p.logical_factor()?;
            }
            Ok(())
        })
    }

    fn logical_factor(&mut self) -> PResult {
        self.node("logical_factor", |p| {
            p.eat("not");
            p.relation()
        })
    }

    fn relation(&mut self) -> PResult {
        self.node("relation", |p| {
            p.arithmetic_expression()?;
            if p.at_any(&["<", "<=", ">", ">=", "==", "<>"]) {
                p.node("relational_operator", |p| {
                    p.bump();
                    Ok(())
                })?;
                p.arithmetic_expression()?;
            }
            Ok(())
        })
    }

    fn arithmetic_expression(&mut self) -> PResult {
        self.node("arithmetic_expression", |p| {
            if p.at_any(&["+", "-", ".+", ".-"]) {
                p.add_operator()?;
            }
            p.term()?;
            while p.at_any(&["+", "-", ".+", ".-"]) {
                p.add_operator()?;
                p.term()?;
            }
            Ok(())
        })
    }

    fn add_operator(&mut self) -> PResult {
        self.node("add_operator", |p| {
            p.bump();
            Ok(())
        })
    }

    fn term(&mut self) -> PResult {
        self.node("term", |p| {
            p.factor()?;
            while p.at_any(&["*", "/", ".*", "./"]) {
                p.node("mul_operator", |p| {
                    p.bump();
                    Ok(())
                })?;
                p.factor()?;
            }
            Ok(())
        })
    }

    fn factor(&mut self) -> PResult {
        self.node("factor", |p| {
            p.primary()?;
            if p.eat("^") || p.eat(".^") {
                p.primary()?;
            }
            Ok(())
        })
    }

    fn primary(&mut self) -> PResult {
        self.node("primary", |p| {
            if p.at_token(Token::UnsignedNumber)
                || p.at_token(Token::String)
                || p.at_any(&["false", "true", "end"])
            {
                p.bump();
                Ok(())
            } else if p.at_any(&["der", "initial", "pure"]) && p.nth_is(1, "(") {
                p.bump();
                p.function_call_args()
            } else if p.eat("(") {
                p.output_expression_list()?;
                p.expect(")")
            } else if p.eat("[") {
                p.expression_list()?;
                while p.eat(";") {
                    p.expression_list()?;
                }
                p.expect("]")
            } else if p.eat("{") {
                if !p.at("}") {
                    p.function_arguments()?;
                }
                p.expect("}")
            } else if p.at_ident() || p.at(".") {
                if p.looks_like_call() {
                    p.name()?;
                    p.function_call_args()
                } else {
                    p.component_reference()
                }
            } else {
                Err(p.error("expression"))
            }
        })
    }

    /// `'.'? IDENT ('.' IDENT)* '('` ahead.
    fn looks_like_call(&self) -> bool {
        let mut n = usize::from(self.at("."));
        if !self.nth_is_ident(n) {
            return false;
        }
        n += 1;
        while self.nth_is(n, ".") && self.nth_is_ident(n + 1) {
            n += 2;
        }
        self.nth_is(n, "(")
    }

    fn name(&mut self) -> PResult {
        self.node("name", |p| {
            p.eat(".");
            p.ident()?;
            while p.at(".") && p.nth_is_ident(1) {
                p.bump();
                p.ident()?;
            }
            Ok(())
        })
    }

    fn component_reference(&mut self) -> PResult {
        self.node("component_reference", |p| {
            p.eat(".");
            p.ident()?;
            if p.at("[") {
                p.array_subscripts()?;
            }
            while p.at(".") && p.nth_is_ident(1) {
                p.bump();
                p.ident()?;
                if p.at("[") {
                    p.array_subscripts()?;
                }
            }
            Ok(())
        })
    }

    fn function_call_args(&mut self) -> PResult {
        self.node("function_call_args", |p| {
            p.expect("(")?;
            if !p.at(")") {
                p.function_arguments()?;
            }
            p.expect(")")
        })
    }

    fn function_arguments(&mut self) -> PResult {
        self.node("function_arguments", |p| {
            loop {
                if p.at_ident() && p.nth_is(1, "=") {
                    p.node("named_argument", |p| {
                        p.ident()?;
                        p.expect("=")?;
                        p.expression()
                    })?;
                } else {
                    p.expression()?;
                }
                if p.eat("for") {
                    p.for_indices()?;
                    break;
                }
                if !p.eat(",") {
                    break;
                }
            }
            Ok(())
        })
    }

    fn output_expression_list(&mut self) -> PResult {
        self.node("output_expression_list", |p| {
            loop {
                if !p.at(",") && !p.at(")") {
                    p.expression()?;
                }
                if !p.eat(",") {
                    return Ok(());
                }
            }
        })
    }

    fn expression_list(&mut self) -> PResult {
        self.node("expression_list", |p| loop {
            p.expression()?;
            if !p.eat(",") {
                return Ok(());
            }
        })
    }

    // ---- comments ----

    fn comment(&mut self) -> PResult {
        self.node("comment", |p| {
            p.string_comment()?;
            if p.at("annotation") {
                p.annotation()?;
            }
            Ok(())
        })
    }

    fn string_comment(&mut self) -> PResult {
        self.node("string_comment", |p| {
            if p.at_token(Token::String) {
                p.bump();
                while p.at("+") && p.nth(1).is_some_and(|l| l.token == Token::String) {
                    p.bump();
                    p.bump();
                }
            }
            Ok(())
        })
    }

    fn annotation(&mut self) -> PResult {
        self.node("annotation", |p| {
            p.expect("annotation")?;
            p.class_modification()
        })
    }
}
