//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::anchor::Priority;
use crate::constraint::Relation;
use crate::parser::ast::*;
use crate::parser::lexer::{invalid_spans, Token};
use crate::ParseError;

/// Parse a layout script into an AST
pub fn parse(input: &str) -> Result<Script, Vec<ParseError>> {
    let unrecognized = invalid_spans(input);
    if !unrecognized.is_empty() {
        return Err(unrecognized
            .into_iter()
            .map(|span| ParseError::unrecognized(input, span))
            .collect());
    }

    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Basic token parsers
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    };

    let signed_number = just(Token::Minus)
        .or_not()
        .then(number.clone())
        .map_with(|(minus, n), e| {
            let value = if minus.is_some() { -n } else { n };
            Spanned::new(value, span_range(&e.span()))
        });

    // View declaration: view name [x: 0, width: 375, safe_top: 44]
    let property = identifier
        .clone()
        .then_ignore(just(Token::Colon))
        .then(signed_number.clone())
        .map_with(|(key, value), e| {
            Spanned::new(ViewProperty { key, value }, span_range(&e.span()))
        });

    let property_block = property
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let view_decl = just(Token::View)
        .ignore_then(identifier.clone())
        .then(property_block.or_not())
        .map(|(name, properties)| ViewDecl {
            name,
            properties: properties.unwrap_or_default(),
        });

    // Anchor path: view.attribute or view.safe.attribute
    let anchor_path = identifier
        .clone()
        .then_ignore(just(Token::Dot))
        .then(just(Token::Safe).then_ignore(just(Token::Dot)).or_not())
        .then(identifier.clone())
        .map_with(|((view, safe), attribute), e| {
            Spanned::new(
                AnchorPath {
                    view,
                    safe: safe.is_some(),
                    attribute,
                },
                span_range(&e.span()),
            )
        });

    let relation = choice((
        just(Token::Equal).to(Relation::Equal),
        just(Token::GreaterOrEqual).to(Relation::GreaterThanOrEqual),
        just(Token::LessOrEqual).to(Relation::LessThanOrEqual),
    ))
    .map_with(|r, e| Spanned::new(r, span_range(&e.span())));

    let modifier = choice((
        just(Token::Plus).ignore_then(number.clone()).map(Modifier::Offset),
        just(Token::Minus).ignore_then(number.clone()).map(Modifier::Inset),
        just(Token::Star).ignore_then(number.clone()).map(Modifier::Scale),
        just(Token::Slash).ignore_then(number.clone()).map(Modifier::Divide),
    ))
    .map_with(|m, e| Spanned::new(m, span_range(&e.span())));

    let sizes = signed_number
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let operand = choice((
        anchor_path
            .clone()
            .then(modifier.repeated().collect::<Vec<_>>())
            .map(|(path, modifiers)| Operand::Anchor(AnchorExpr { path, modifiers })),
        signed_number.clone().map(|n| Operand::Constant(n.node)),
        sizes.map(Operand::Sizes),
    ))
    .map_with(|op, e| Spanned::new(op, span_range(&e.span())));

    // Priority: • 750, @ high
    let priority_level = select! {
        Token::Ident(s) => s,
    }
    .try_map(|name, span: SimpleSpan| {
        Priority::from_name(&name).ok_or_else(|| {
            Rich::custom(
                span,
                format!(
                    "'{}' is not a priority level. Expected a number or one of: required, high, low, fitting, lowest",
                    name
                ),
            )
        })
    });

    let priority = just(Token::Priority)
        .ignore_then(choice((number.clone().map(Priority::from), priority_level)))
        .map_with(|p, e| Spanned::new(p, span_range(&e.span())));

    let constraint_decl = anchor_path
        .clone()
        .then(relation)
        .then(operand)
        .then(priority.or_not())
        .map(|(((subject, relation), operand), priority)| ConstraintDecl {
            subject,
            relation,
            operand,
            priority,
        });

    // Recursive statement parser
    let statement = recursive(|stmt| {
        let block = stmt
            .clone()
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BraceOpen), just(Token::BraceClose));

        // `else if` chains nest the next conditional as the else branch
        let else_branch = just(Token::Else).ignore_then(choice((
            block.clone(),
            just(Token::If)
                .rewind()
                .ignore_then(stmt.clone())
                .map(|s: Spanned<Statement>| vec![s]),
        )));

        let conditional = just(Token::If)
            .ignore_then(just(Token::Bang).or_not())
            .then(identifier.clone())
            .then(block)
            .then(else_branch.or_not())
            .map(|(((negated, flag), then_branch), else_branch)| Conditional {
                flag,
                negated: negated.is_some(),
                then_branch,
                else_branch: else_branch.unwrap_or_default(),
            });

        choice((
            view_decl.clone().map(Statement::View),
            conditional.map(Statement::Conditional),
            constraint_decl.clone().map(Statement::Constraint),
        ))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
        .boxed()
    });

    // Script is a list of statements
    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Script { statements })
}
