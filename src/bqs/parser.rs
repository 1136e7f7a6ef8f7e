//! Recursive-descent parser for the BQS grammar.
//!
//! Precedence, low to high: `or` < `and` < `not` < primary. A primary is a
//! parenthesized group, a comparison, or a geospatial predicate.
//!
//! Malformed terms do not fail the parse. The parser rewinds, skips the
//! damaged fragment, and yields [`Expr::Absent`] in its place; only damage
//! to the outermost structure (an unclosed group, trailing garbage) is a
//! hard error.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use crate::bqs::ast::{AstLiteral, AstOp, AttrPath, Expr, GeoPredicate};
use crate::bqs::lexer::{Token, TokenKind};
use crate::model::geometry::{dms_to_decimal, CoordSeq};
use crate::model::{Coord, DistanceUnit, Shape};
use crate::{Error, Result};

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_query(&mut self) -> Result<Expr> {
        let expr = self.parse_or()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    // ========================================================================
    // Boolean structure
    // ========================================================================

    fn parse_or(&mut self) -> Result<Expr> {
        let mut children = vec![self.parse_and()?];
        while self.eat(TokenKind::Or) {
            children.push(self.parse_and()?);
        }
        if children.len() == 1 {
            Ok(children.pop().unwrap_or(Expr::Absent))
        } else {
            Ok(Expr::Or(children))
        }
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut children = vec![self.parse_not()?];
        while self.eat(TokenKind::And) {
            children.push(self.parse_not()?);
        }
        if children.len() == 1 {
            Ok(children.pop().unwrap_or(Expr::Absent))
        } else {
            Ok(Expr::And(children))
        }
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.eat(TokenKind::Not) {
            Ok(Expr::Not(Box::new(self.parse_not()?)))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.eat(TokenKind::LParen) {
            let inner = self.parse_or()?;
            self.expect(TokenKind::RParen)?;
            return Ok(inner);
        }
        let start = self.pos;
        match self.try_parse_term() {
            Some(expr) => Ok(expr),
            None => {
                trace!(position = start, "dropping unparseable query term");
                self.pos = start;
                self.skip_term();
                Ok(Expr::Absent)
            }
        }
    }

    /// Skip a damaged term: everything up to the next boolean connective or
    /// the close of the enclosing group, tracking nested parentheses.
    fn skip_term(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return,
                TokenKind::And | TokenKind::Or if depth == 0 => return,
                TokenKind::RParen if depth == 0 => return,
                TokenKind::LParen => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RParen => {
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Terms
    // ========================================================================

    /// Attempt a comparison or geospatial term. `None` means the fragment
    /// did not parse; the caller rewinds and drops it.
    fn try_parse_term(&mut self) -> Option<Expr> {
        let path = self.try_parse_path()?;
        match self.peek() {
            TokenKind::Eq | TokenKind::Neq | TokenKind::Lt | TokenKind::Lte | TokenKind::Gt
            | TokenKind::Gte | TokenKind::Like => {
                let op = self.parse_op();
                let literal = self.try_parse_literal()?;
                Some(Expr::Comparison { path, op, literal })
            }
            TokenKind::Intersect => {
                self.advance();
                let shape = self.try_parse_shape()?;
                Some(Expr::Geo { path, predicate: GeoPredicate::Intersect { shape } })
            }
            TokenKind::Within => {
                self.advance();
                let (distance, unit, shape) = self.try_parse_relative_geo()?;
                Some(Expr::Geo { path, predicate: GeoPredicate::Within { distance, unit, shape } })
            }
            TokenKind::Beyond => {
                self.advance();
                let (distance, unit, shape) = self.try_parse_relative_geo()?;
                Some(Expr::Geo { path, predicate: GeoPredicate::Beyond { distance, unit, shape } })
            }
            _ => None,
        }
    }

    fn try_parse_path(&mut self) -> Option<AttrPath> {
        let first = self.eat_ident()?;
        let mut segments = vec![first];
        loop {
            match self.peek() {
                TokenKind::Dot | TokenKind::Colon => {
                    self.advance();
                    segments.push(self.eat_ident()?);
                }
                _ => break,
            }
        }
        match segments.len() {
            1 => {
                let field = segments.pop()?;
                Some(AttrPath::field_only(field))
            }
            2 => {
                let field = segments.pop()?;
                let entity = segments.pop()?;
                Some(AttrPath { grandparent: None, entity: Some(entity), field })
            }
            3 => {
                let field = segments.pop()?;
                let entity = segments.pop()?;
                let grandparent = segments.pop()?;
                Some(AttrPath { grandparent: Some(grandparent), entity: Some(entity), field })
            }
            _ => None,
        }
    }

    fn parse_op(&mut self) -> AstOp {
        let op = match self.peek() {
            TokenKind::Neq => AstOp::Neq,
            TokenKind::Lt => AstOp::Lt,
            TokenKind::Lte => AstOp::LtEq,
            TokenKind::Gt => AstOp::Gt,
            TokenKind::Gte => AstOp::GtEq,
            TokenKind::Like => AstOp::Like,
            _ => AstOp::Eq,
        };
        self.advance();
        op
    }

    fn try_parse_literal(&mut self) -> Option<AstLiteral> {
        match self.peek() {
            TokenKind::StringLiteral => {
                let text = self.current().text.clone();
                self.advance();
                Some(match parse_bqs_date(&text) {
                    Some(date) => AstLiteral::Date(date),
                    None => AstLiteral::Text(text),
                })
            }
            TokenKind::Number => {
                let value: f64 = self.current().text.parse().ok()?;
                self.advance();
                Some(AstLiteral::Number(value))
            }
            _ => None,
        }
    }

    // ========================================================================
    // Geo literals
    // ========================================================================

    fn try_parse_relative_geo(&mut self) -> Option<(f64, DistanceUnit, Shape)> {
        let distance = self.eat_number()?;
        let unit = self.try_parse_unit().unwrap_or(DistanceUnit::Meters);
        if !self.eat(TokenKind::Of) {
            return None;
        }
        let shape = self.try_parse_shape()?;
        Some((distance, unit, shape))
    }

    fn try_parse_shape(&mut self) -> Option<Shape> {
        let head = self.peek();
        self.advance();
        if !self.eat(TokenKind::LParen) {
            return None;
        }
        let shape = match head {
            TokenKind::Point => {
                let c = self.try_parse_coord()?;
                Shape::Point(c)
            }
            TokenKind::Rectangle => {
                let upper_left = self.try_parse_coord()?;
                if !self.eat(TokenKind::Comma) {
                    return None;
                }
                let lower_right = self.try_parse_coord()?;
                Shape::Rectangle { upper_left, lower_right }
            }
            TokenKind::Polygon => Shape::Polygon(self.try_parse_coord_list()?),
            TokenKind::Line => Shape::Line(self.try_parse_coord_list()?),
            TokenKind::Circle => {
                let center = self.try_parse_coord()?;
                if !self.eat(TokenKind::Comma) {
                    return None;
                }
                let radius = self.eat_number()?;
                let unit = self.try_parse_unit().unwrap_or(DistanceUnit::Meters);
                Shape::Circle { center, radius_m: unit.to_meters(radius) }
            }
            TokenKind::Ellipse => {
                let center = self.try_parse_coord()?;
                if !self.eat(TokenKind::Comma) {
                    return None;
                }
                let major = self.eat_number()?;
                let major_unit = self.try_parse_unit().unwrap_or(DistanceUnit::Meters);
                if !self.eat(TokenKind::Comma) {
                    return None;
                }
                let minor = self.eat_number()?;
                let minor_unit = self.try_parse_unit().unwrap_or(DistanceUnit::Meters);
                if !self.eat(TokenKind::Comma) {
                    return None;
                }
                let rotation = self.eat_number()?;
                Shape::Ellipse {
                    center,
                    major_m: major_unit.to_meters(major),
                    minor_m: minor_unit.to_meters(minor),
                    rotation_deg: rotation,
                }
            }
            _ => return None,
        };
        if !self.eat(TokenKind::RParen) {
            return None;
        }
        Some(shape)
    }

    fn try_parse_coord_list(&mut self) -> Option<CoordSeq> {
        let mut coords = CoordSeq::new();
        coords.push(self.try_parse_coord()?);
        while self.eat(TokenKind::Comma) {
            coords.push(self.try_parse_coord()?);
        }
        if coords.len() < 2 {
            return None;
        }
        Some(coords)
    }

    /// One lat,lon pair. Each component is either a decimal degree number or
    /// a DMS run (`81:45:33.2N`).
    fn try_parse_coord(&mut self) -> Option<Coord> {
        let lat = self.try_parse_coord_component()?;
        if !self.eat(TokenKind::Comma) {
            return None;
        }
        let lon = self.try_parse_coord_component()?;
        Some(Coord::new(lat, lon))
    }

    fn try_parse_coord_component(&mut self) -> Option<f64> {
        let first = self.eat_number()?;
        if !self.eat(TokenKind::Colon) {
            return Some(first);
        }
        let min = self.eat_number()?;
        if !self.eat(TokenKind::Colon) {
            return None;
        }
        let sec = self.eat_number()?;
        let hemisphere = self.eat_ident()?;
        dms_to_decimal(first, min, sec, &hemisphere)
    }

    fn try_parse_unit(&mut self) -> Option<DistanceUnit> {
        let TokenKind::Identifier = self.peek() else {
            return None;
        };
        let word = self.current().text.to_lowercase();
        let unit = match word.as_str() {
            "feet" | "foot" => DistanceUnit::Feet,
            "meters" | "meter" => DistanceUnit::Meters,
            "kilometers" | "kilometer" => DistanceUnit::Kilometers,
            "nautical" => {
                self.advance();
                return self.eat_ident_matching("miles").map(|_| DistanceUnit::NauticalMiles);
            }
            "statute" => {
                self.advance();
                return self.eat_ident_matching("miles").map(|_| DistanceUnit::StatuteMiles);
            }
            "miles" | "mile" => DistanceUnit::StatuteMiles,
            _ => return None,
        };
        self.advance();
        Some(unit)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self) -> Option<String> {
        if self.peek() == TokenKind::Identifier {
            let text = self.current().text.clone();
            self.advance();
            Some(text)
        } else {
            None
        }
    }

    fn eat_ident_matching(&mut self, expected: &str) -> Option<()> {
        let word = self.eat_ident()?;
        word.eq_ignore_ascii_case(expected).then_some(())
    }

    fn eat_number(&mut self) -> Option<f64> {
        if self.peek() == TokenKind::Number {
            let value = self.current().text.parse().ok()?;
            self.advance();
            Some(value)
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            let token = self.current();
            Err(Error::SyntaxError {
                position: token.span.start,
                message: format!("Expected {kind:?}, found {:?}", token.kind),
            })
        }
    }
}

/// BQS date literals: `YYYY/MM/DD HH:MM:SS[.fff]` or `YYYY/MM/DD`, both UTC.
fn parse_bqs_date(text: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y/%m/%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y/%m/%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bqs::lexer::tokenize;

    fn parse(input: &str) -> Result<Expr> {
        let tokens = tokenize(input)?;
        Parser::new(&tokens).parse_query()
    }

    #[test]
    fn test_or_of_two_likes() {
        let expr = parse("(NSIL_FILE.title like 'T') or (NSIL_COMMON.source like 'T')").unwrap();
        let Expr::Or(children) = expr else { panic!("expected or: {expr:?}") };
        assert_eq!(children.len(), 2);
        for child in &children {
            assert!(matches!(child, Expr::Comparison { op: AstOp::Like, .. }));
        }
    }

    #[test]
    fn test_precedence_or_binds_loosest() {
        let expr = parse("a like 'x' or b like 'y' and not c = 1").unwrap();
        let Expr::Or(children) = expr else { panic!("expected or: {expr:?}") };
        assert_eq!(children.len(), 2);
        let Expr::And(and_children) = &children[1] else { panic!("expected and") };
        assert!(matches!(and_children[1], Expr::Not(_)));
    }

    #[test]
    fn test_grandparent_path() {
        let expr = parse("NSIL_PART:NSIL_CARD.status = 'OBSOLETE'").unwrap();
        let Expr::Comparison { path, .. } = expr else { panic!() };
        assert_eq!(path.grandparent.as_deref(), Some("NSIL_PART"));
        assert_eq!(path.entity.as_deref(), Some("NSIL_CARD"));
        assert_eq!(path.field, "status");
    }

    #[test]
    fn test_date_literal_promoted() {
        let expr = parse("NSIL_CARD.dateTimeModified >= '2016/06/01 13:45:59.000'").unwrap();
        let Expr::Comparison { literal: AstLiteral::Date(dt), .. } = expr else {
            panic!("expected date comparison")
        };
        assert_eq!(dt, Utc.with_ymd_and_hms(2016, 6, 1, 13, 45, 59).unwrap());
    }

    #[test]
    fn test_short_date_is_midnight() {
        let expr = parse("NSIL_CARD.dateTimeModified > '2016/06/01'").unwrap();
        let Expr::Comparison { literal: AstLiteral::Date(dt), .. } = expr else { panic!() };
        assert_eq!(dt, Utc.with_ymd_and_hms(2016, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_polygon_vertices() {
        let expr = parse(
            "NSIL_COVERAGE.spatialGeographicReferenceBox intersect \
             POLYGON(10.0,20.0,10.0,25.0,5.0,25.0,5.0,20.0)",
        )
        .unwrap();
        let Expr::Geo { predicate: GeoPredicate::Intersect { shape }, .. } = expr else {
            panic!()
        };
        assert_eq!(shape.vertex_count(), 4);
    }

    #[test]
    fn test_dms_point() {
        let expr = parse(
            "NSIL_COVERAGE.spatialGeographicReferenceBox intersect \
             POINT(81:45:33.2N,146:25:01.8W)",
        )
        .unwrap();
        let Expr::Geo { predicate: GeoPredicate::Intersect { shape: Shape::Point(c) }, .. } = expr
        else {
            panic!()
        };
        assert!(c.lat > 81.0 && c.lat < 82.0);
        assert!(c.lon < -146.0 && c.lon > -147.0);
    }

    #[test]
    fn test_within_with_unit_words() {
        let expr = parse(
            "NSIL_COVERAGE.spatialGeographicReferenceBox within 6 statute miles of \
             POINT(46.1,81.7)",
        )
        .unwrap();
        let Expr::Geo { predicate: GeoPredicate::Within { distance, unit, .. }, .. } = expr else {
            panic!()
        };
        assert_eq!(distance, 6.0);
        assert_eq!(unit, DistanceUnit::StatuteMiles);
    }

    #[test]
    fn test_omitted_unit_defaults_to_meters() {
        let expr =
            parse("NSIL_COVERAGE.spatialGeographicReferenceBox beyond 6000 of POINT(46.1,81.7)")
                .unwrap();
        let Expr::Geo { predicate: GeoPredicate::Beyond { unit, .. }, .. } = expr else { panic!() };
        assert_eq!(unit, DistanceUnit::Meters);
    }

    #[test]
    fn test_malformed_term_becomes_absent() {
        let expr = parse("NSIL_CARD.status = 'NEW' and 42 = 'nonsense'").unwrap();
        let Expr::And(children) = expr else { panic!("expected and: {expr:?}") };
        assert!(matches!(children[0], Expr::Comparison { .. }));
        assert_eq!(children[1], Expr::Absent);
    }

    #[test]
    fn test_malformed_shape_becomes_absent() {
        let expr = parse(
            "NSIL_CARD.status = 'NEW' and \
             NSIL_COVERAGE.spatialGeographicReferenceBox intersect POLYGON(1.0)",
        )
        .unwrap();
        let Expr::And(children) = expr else { panic!("expected and: {expr:?}") };
        assert_eq!(children[1], Expr::Absent);
    }

    #[test]
    fn test_unbalanced_paren_is_hard_error() {
        assert!(parse("(NSIL_CARD.status = 'NEW'").is_err());
        assert!(parse("NSIL_CARD.status = 'NEW')").is_err());
    }
}
