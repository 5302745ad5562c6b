//! Parser for the circuit DSL.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::Orientation;
use crate::components::{ComponentKind, SourceKind};
use crate::error::{AcMeshError, Result};

/// Parser for circuit DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire circuit description.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => self.parse_statement(&mut ast)?,
                _ => {
                    return Err(AcMeshError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement must end at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(AcMeshError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(AcMeshError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn at_end_of_line(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn expect_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| AcMeshError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".freq" | ".frequency" | ".hz" => {
                if ast.frequency_hz.is_some() {
                    return Err(AcMeshError::parse(line, "frequency already set"));
                }
                ast.frequency_hz = Some(self.expect_number()?);
            }
            ".omega" => {
                if ast.omega.is_some() {
                    return Err(AcMeshError::parse(line, "angular frequency already set"));
                }
                ast.omega = Some(self.expect_number()?);
            }
            ".angle" => {
                if !ast.sources.is_empty() {
                    return Err(AcMeshError::parse(line, ".angle must precede every source"));
                }
                let unit = self.expect(TokenKind::Identifier)?;
                ast.angle_unit = unit
                    .text
                    .parse()
                    .map_err(|msg: String| AcMeshError::parse(line, msg))?;
            }
            _ => {
                return Err(AcMeshError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_statement(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let name = self.current.text.clone();
        let line = self.current.line;

        let first_char = name.chars().next().unwrap_or('?');
        let statement = StatementType::from_prefix(first_char).ok_or_else(|| {
            AcMeshError::UnknownStatement {
                statement: name.clone(),
                line,
            }
        })?;
        self.advance()?;

        match statement {
            StatementType::Branch => {
                let elements = self.parse_elements(&name, line)?;
                ast.branches.push(BranchDef {
                    name,
                    elements,
                    line,
                });
            }
            StatementType::Mesh => {
                let mut branches = Vec::new();
                while !self.at_end_of_line() {
                    branches.push(self.parse_branch_ref()?);
                }
                ast.meshes.push(MeshDef {
                    name,
                    branches,
                    line,
                });
            }
            StatementType::VoltageSource | StatementType::CurrentSource => {
                let kind = if statement == StatementType::VoltageSource {
                    SourceKind::Voltage
                } else {
                    SourceKind::Current
                };
                if self.at_end_of_line() {
                    return Err(AcMeshError::invalid_component(&name, line, "missing branch reference"));
                }
                let branch = self.parse_branch_ref()?;
                if self.at_end_of_line() {
                    return Err(AcMeshError::invalid_component(&name, line, "missing magnitude"));
                }
                let magnitude = self.expect_number()?;
                let angle = if self.current.kind == TokenKind::Number {
                    self.expect_number()?
                } else {
                    0.0
                };
                ast.sources.push(SourceDef {
                    kind,
                    name,
                    branch,
                    magnitude,
                    angle,
                    line,
                });
            }
        }

        Ok(())
    }

    /// Parse `KIND=value` pairs until end of line.
    fn parse_elements(&mut self, branch: &str, line: usize) -> Result<Vec<ElementDef>> {
        let mut elements = Vec::new();
        while !self.at_end_of_line() {
            let keyword = self.expect(TokenKind::Identifier)?;
            let kind = ComponentKind::from_keyword(&keyword.text).ok_or_else(|| {
                AcMeshError::invalid_component(
                    branch,
                    line,
                    format!("unknown element '{}' (expected R, L or C)", keyword.text),
                )
            })?;
            self.expect(TokenKind::Equals)?;
            let value = self.expect_number()?;
            elements.push(ElementDef { kind, value });
        }
        Ok(elements)
    }

    fn parse_branch_ref(&mut self) -> Result<BranchRef> {
        let orientation = match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                Orientation::Reverse
            }
            TokenKind::Plus => {
                self.advance()?;
                Orientation::Forward
            }
            _ => Orientation::Forward,
        };
        let name = self.expect(TokenKind::Identifier)?.text;
        Ok(BranchRef { name, orientation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;
    use crate::phasor::AngleUnit;

    #[test]
    fn test_parse_branch() {
        let ast = parse("B1 R=3 L=1 C=1.5 R=10k").unwrap();
        assert_eq!(ast.branches.len(), 1);
        let branch = &ast.branches[0];
        assert_eq!(branch.name, "B1");
        assert_eq!(branch.elements.len(), 4);
        assert_eq!(branch.elements[0].kind, ComponentKind::Resistor);
        assert_eq!(branch.elements[2].kind, ComponentKind::Capacitor);
        assert_eq!(branch.elements[3].value, 10_000.0);
    }

    #[test]
    fn test_parse_empty_branch() {
        let ast = parse("B5\n").unwrap();
        assert!(ast.branches[0].elements.is_empty());
    }

    #[test]
    fn test_parse_mesh_orientations() {
        let ast = parse("M2 -B1 B2 +B3").unwrap();
        let mesh = &ast.meshes[0];
        assert_eq!(mesh.name, "M2");
        let signs: Vec<_> = mesh.branches.iter().map(|b| b.orientation).collect();
        assert_eq!(
            signs,
            vec![Orientation::Reverse, Orientation::Forward, Orientation::Forward]
        );
        assert_eq!(mesh.branches[2].name, "B3");
    }

    #[test]
    fn test_parse_sources() {
        let ast = parse(".angle rad\nV1 -B0 12\nI1 B5 3 0.17").unwrap();
        assert_eq!(ast.angle_unit, AngleUnit::Radians);
        assert_eq!(ast.sources.len(), 2);
        let v = &ast.sources[0];
        assert_eq!(v.kind, SourceKind::Voltage);
        assert_eq!(v.branch.orientation, Orientation::Reverse);
        assert_eq!(v.magnitude, 12.0);
        assert_eq!(v.angle, 0.0);
        let i = &ast.sources[1];
        assert_eq!(i.kind, SourceKind::Current);
        assert_eq!(i.angle, 0.17);
    }

    #[test]
    fn test_parse_frequency_directives() {
        let ast = parse(".freq 1k\n.omega 6283.185307179586").unwrap();
        assert_eq!(ast.frequency_hz, Some(1000.0));
        assert_eq!(ast.omega, Some(6283.185307179586));
        assert!(parse(".freq 1\n.freq 2").is_err());
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# RL branch\nB1 R=1k ; series resistor\n\nM1 B1\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.branches.len(), 1);
        assert_eq!(ast.meshes.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse("X1 foo"),
            Err(AcMeshError::UnknownStatement { .. })
        ));
        assert!(matches!(
            parse("B1 Q=3"),
            Err(AcMeshError::InvalidComponent { .. })
        ));
        assert!(matches!(parse(".bogus 1"), Err(AcMeshError::ParseError { .. })));
        assert!(matches!(
            parse("V1 B1"),
            Err(AcMeshError::InvalidComponent { .. })
        ));
        assert!(parse(".angle grad").is_err());
        assert!(matches!(
            parse("V1 B1 1 90\n.angle rad"),
            Err(AcMeshError::ParseError { line: 2, .. })
        ));
        assert!(parse("V1 B1 1 2 3").is_err());
    }
}
