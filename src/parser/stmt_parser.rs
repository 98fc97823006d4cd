//! 文の解析
//!
//! 先頭トークンによるディスパッチと、各文構文（定義・代入・if・while・
//! 関数定義・インポート・return・ループ制御キーワード）の解析を行います。

use crate::ast::*;
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// 1つの文を解析
    pub(super) fn parse_statement(&mut self) -> ParseResult<Expr> {
        let token = match self.current_token() {
            Some(t) => t.clone(),
            None => return Err(self.error_here("Invalid token: ''")),
        };

        if matches!(token.kind, TokenKind::Identifier(_))
            && matches!(self.peek(1).map(|t| &t.kind), Some(TokenKind::Assign))
        {
            return self.parse_assignment().map(Expr::Assignment);
        }

        let next_is_simple_operand = self
            .peek(1)
            .map(|t| t.kind.is_simple_operand())
            .unwrap_or(false);
        if token.kind.is_simple_operand()
            || (token.kind.is_unary_operator() && next_is_simple_operand)
        {
            return self.parse_expression().map(Expr::Operand);
        }

        match token.kind {
            TokenKind::If => self.parse_if().map(Expr::If),
            TokenKind::Def => self.parse_definition().map(Expr::Definition),
            TokenKind::While => self.parse_while().map(Expr::While),
            TokenKind::Skip => {
                self.advance();
                Ok(Expr::Keyword(KeywordExpr {
                    kind: KeywordKind::Skip,
                    span: token.span,
                }))
            }
            TokenKind::Break => {
                self.advance();
                Ok(Expr::Keyword(KeywordExpr {
                    kind: KeywordKind::Break,
                    span: token.span,
                }))
            }
            TokenKind::AttributeStart => self.parse_func_import().map(Expr::FuncImport),
            TokenKind::Fun => self.parse_func_definition().map(Expr::FuncDefinition),
            TokenKind::Return => self.parse_return().map(Expr::Return),
            _ => Err(self.error_at(
                &format!("Invalid token: '{}'", token.text),
                token.span.start,
            )),
        }
    }

    /// `def name[: type] = expr`
    fn parse_definition(&mut self) -> ParseResult<DefinitionExpr> {
        let def_span = self.expect(&TokenKind::Def, "'def' keyword expected")?;
        let (name, name_span) = self.expect_identifier("Identifier expected")?;

        let declared_type = if self.match_token(&TokenKind::Colon) {
            Some(self.parse_type_expr(false)?)
        } else {
            None
        };

        self.expect(&TokenKind::Assign, "'=' expected")?;
        let value = self.parse_expression()?;
        let span = def_span.merge(value.span());

        Ok(DefinitionExpr {
            name,
            name_span,
            declared_type,
            value,
            span,
        })
    }

    /// `name = expr`
    fn parse_assignment(&mut self) -> ParseResult<AssignmentExpr> {
        let (name, name_span) = self.expect_identifier("Identifier expected")?;
        self.expect(&TokenKind::Assign, "'=' operator expected")?;
        let value = self.parse_expression()?;
        let span = name_span.merge(value.span());

        Ok(AssignmentExpr {
            name,
            name_span,
            value,
            span,
        })
    }

    /// `if (cond) { } [elif (cond) { }]* [else { }]`
    ///
    /// `elif`はネストした`IfExpr`として連鎖します。
    fn parse_if(&mut self) -> ParseResult<IfExpr> {
        let if_span = if self.check(&TokenKind::If) || self.check(&TokenKind::Elif) {
            let span = self.current_span();
            self.advance();
            span
        } else {
            return Err(self.error_here("'if' keyword expected"));
        };

        let condition = self.parse_condition()?;

        if self.is_at_end() {
            return Err(self.error_here("if expression must have a body"));
        }
        let block = self.parse_if_else_clause()?;

        let mut span = if_span.merge(block.span);
        let mut elif = None;
        let mut else_block = None;

        if self.check(&TokenKind::Elif) {
            let elif_expr = self.parse_if()?;
            span = span.merge(elif_expr.span);
            elif = Some(Box::new(elif_expr));
        } else if self.match_token(&TokenKind::Else) {
            let block = self.parse_if_else_clause()?;
            span = span.merge(block.span);
            else_block = Some(block);
        }

        Ok(IfExpr {
            condition,
            block,
            elif,
            else_block,
            span,
        })
    }

    /// `while (cond) { }`
    fn parse_while(&mut self) -> ParseResult<WhileExpr> {
        let while_span = self.expect(&TokenKind::While, "'while' keyword expected")?;
        let condition = self.parse_condition()?;
        let block = self.parse_block()?;
        let span = while_span.merge(block.span);

        Ok(WhileExpr {
            condition,
            block,
            span,
        })
    }

    /// 条件式は必ず括弧で囲まれる
    fn parse_condition(&mut self) -> ParseResult<OperandExpr> {
        let open_span = self.expect(&TokenKind::LeftParen, "'(' expected")?;
        let inner = self.parse_expression()?;
        let close_span = self.expect(&TokenKind::RightParen, "')' expected")?;

        Ok(OperandExpr::Parenthesized(ParenthesizedExpr {
            inner: Box::new(inner),
            span: open_span.merge(close_span),
        }))
    }

    /// if/elseの本体：`{ }`ブロック、または単一の式
    fn parse_if_else_clause(&mut self) -> ParseResult<BlockExpr> {
        if self.check(&TokenKind::LeftBrace) {
            self.parse_block()
        } else {
            let expr = self.parse_expression()?;
            let span = expr.span();
            Ok(BlockExpr {
                statements: vec![Expr::Operand(expr)],
                span,
            })
        }
    }

    /// `{ statements }`
    pub(super) fn parse_block(&mut self) -> ParseResult<BlockExpr> {
        let open_span = self.expect(&TokenKind::LeftBrace, "'{' expected")?;

        let mut statements = Vec::new();
        while !self.is_at_end() && !self.check(&TokenKind::RightBrace) {
            statements.push(self.parse_statement()?);
        }

        let close_span = self.expect(&TokenKind::RightBrace, "'}' expected")?;

        Ok(BlockExpr {
            statements,
            span: open_span.merge(close_span),
        })
    }

    /// `return [expr]`
    fn parse_return(&mut self) -> ParseResult<ReturnExpr> {
        let return_span = self.expect(&TokenKind::Return, "'return' keyword expected")?;

        let has_operand = self
            .current_token()
            .map(|t| t.kind.is_simple_operand() || t.kind.is_unary_operator())
            .unwrap_or(false);

        let (value, span) = if has_operand {
            let expr = self.parse_expression()?;
            let span = return_span.merge(expr.span());
            (Some(expr), span)
        } else {
            (None, return_span)
        };

        Ok(ReturnExpr { value, span })
    }

    /// `fun Name([pre] params)[: type] { }`
    fn parse_func_definition(&mut self) -> ParseResult<FuncDefinitionExpr> {
        let signature = self.parse_func_signature()?;
        let body = self.parse_block()?;
        let span = signature.span.merge(body.span);

        let decl_id = self.next_decl_id;
        self.next_decl_id += 1;

        Ok(FuncDefinitionExpr {
            decl_id,
            signature,
            body,
            span,
        })
    }

    /// `[<"External">] fun Name(params): type`
    fn parse_func_import(&mut self) -> ParseResult<FuncImportExpr> {
        let attr_start = self.current_span();

        let external_name = match (
            self.current_token().map(|t| t.kind.clone()),
            self.peek(1).map(|t| t.kind.clone()),
            self.peek(2).map(|t| t.kind.clone()),
        ) {
            (
                Some(TokenKind::AttributeStart),
                Some(TokenKind::Str(name)),
                Some(TokenKind::AttributeEnd),
            ) => {
                self.advance();
                self.advance();
                self.advance();
                name
            }
            _ => {
                return Err(self.error_at(
                    "Function import attribute couldn't be parsed",
                    attr_start.start,
                ))
            }
        };

        let signature = self.parse_func_signature()?;
        let span = attr_start.merge(signature.span);

        let decl_id = self.next_decl_id;
        self.next_decl_id += 1;

        Ok(FuncImportExpr {
            decl_id,
            external_name,
            signature,
            span,
        })
    }

    /// `fun Name([pre] name[: type], ...)[: type]`
    ///
    /// `pre`が先頭にある場合は拡張関数となり、アクセサ構文で呼び出せます。
    /// 型注釈ではジェネリック型パラメータが許可されます。
    fn parse_func_signature(&mut self) -> ParseResult<FuncSignature> {
        let fun_span = self.expect(&TokenKind::Fun, "'fun' keyword expected")?;
        let (name, name_span) =
            self.expect_identifier("Function name expected after 'fun' keyword")?;
        self.expect(&TokenKind::LeftParen, "'(' expected")?;

        let is_extension = self.match_token(&TokenKind::Pre);
        let mut parameter_expected = is_extension;
        let mut params = Vec::new();

        loop {
            if matches!(
                self.current_token().map(|t| &t.kind),
                Some(TokenKind::Identifier(_))
            ) {
                let (param_name, param_span) = self.expect_identifier("Parameter name expected")?;

                let ty = if self.match_token(&TokenKind::Colon) {
                    Some(self.parse_type_expr(true)?)
                } else {
                    None
                };

                let span = ty
                    .as_ref()
                    .map(|t| param_span.merge(t.span()))
                    .unwrap_or(param_span);
                params.push(ParamDecl {
                    name: param_name,
                    ty,
                    span,
                });

                if self.match_token(&TokenKind::Comma) {
                    parameter_expected = true;
                    continue;
                }
            } else if parameter_expected {
                return Err(self.error_here("Parameter name expected"));
            }
            break;
        }

        self.expect(&TokenKind::RightParen, "')' expected")?;

        let return_type = if self.match_token(&TokenKind::Colon) {
            Some(self.parse_type_expr(true)?)
        } else {
            None
        };

        let end = return_type
            .as_ref()
            .map(|t| t.span().end)
            .unwrap_or_else(|| self.previous_end());

        Ok(FuncSignature {
            name,
            name_span,
            is_extension,
            params,
            return_type,
            span: Span::new(fun_span.start, end),
        })
    }
}
