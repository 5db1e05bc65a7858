use itertools::Itertools;
use procr_ansi_term::{Color, Style};
use std::fmt;

use crate::{
    edge::Edge,
    geometry::{Geometry, Origin},
    node::Node,
    point::IntPoint,
    polygon::Polygon,
};

pub const STYLE_TYPE_NAME: Style = Style::new().bold().fg(Color::Purple);
pub const STYLE_TYPE_ID: Style = Style::new().fg(Color::White).bold();
pub const STYLE_LABEL: Style = Style::new().fg(Color::Yellow);
pub const STYLE_ITEM: Style = Style::new().fg(Color::Cyan);

pub const COLOR_GREEN: Color = Color::Fixed(40);
pub const COLOR_BLUE: Color = Color::Fixed(27);
pub const COLOR_ORANGE: Color = Color::Fixed(208);

pub const ORIGIN_A_EDGE: Style = Style::new().fg(COLOR_GREEN);
pub const ORIGIN_B_EDGE: Style = Style::new().fg(COLOR_BLUE);

pub fn debug_with(
    f: impl Fn(&mut fmt::Formatter) -> fmt::Result,
) -> impl fmt::Debug {
    struct DebugWith<F>(F);

    impl<F> fmt::Debug for DebugWith<F>
    where
        F: Fn(&mut fmt::Formatter) -> fmt::Result,
    {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            self.0(f)
        }
    }

    DebugWith(f)
}

#[macro_export]
macro_rules! type_name {
    ($name:expr) => {
        $crate::debug::STYLE_TYPE_NAME.paint($name)
    };
}

#[macro_export]
macro_rules! type_id {
    ($label:expr, $id:expr) => {
        format!(
            "{}{}",
            $crate::debug::STYLE_LABEL.paint($label),
            $crate::type_id!(@id_expr $id)
        )
    };
    ($id:expr) => {
        $crate::type_id!(@id_expr $id)
    };
    (@id_expr $id:expr) => {
        $crate::debug::STYLE_TYPE_ID
            .paint(format!("[{}]", $id.index()))
            .to_string()
    };
}

#[macro_export]
macro_rules! item {
    ($label:expr, $item:expr) => {
        format!("{}:{}", $crate::debug::STYLE_LABEL.paint($label), $item)
    };
    ($item:expr) => {
        format!("{}", $crate::debug::STYLE_ITEM.paint(format!("{}", $item)))
    };
}

#[inline]
fn origin_style(origin: Origin) -> Style {
    match origin {
        Origin::A => ORIGIN_A_EDGE,
        Origin::B => ORIGIN_B_EDGE,
    }
}

#[macro_export]
macro_rules! dbg_edge {
    ($geometry:expr, $edge:expr) => {
        $crate::debug::debug_with($crate::debug::debug_edge($geometry, $edge))
    };
}

pub fn debug_edge<'a>(
    geometry: &'a Geometry,
    edge: &'a Edge,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + 'a {
    move |f| {
        write!(f, "{}", Style::new().reset_prefix().paint(""))?;
        write!(
            f,
            "{}{}",
            type_name!("E"),
            origin_style(edge.origin)
                .paint(format!("{:?}{}:", edge.origin, edge.id.index()))
        )?;
        write!(
            f,
            " {} -> {}{}",
            item!(geometry[edge.source].point),
            item!(geometry[edge.target].point),
            if edge.is_used() { " (used)" } else { "" }
        )
    }
}

#[macro_export]
macro_rules! dbg_edges {
    ($geometry:expr) => {
        $crate::debug::debug_with($crate::debug::debug_edges($geometry))
    };
}

pub fn debug_edges(
    geometry: &Geometry,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    |f| {
        writeln!(f)?;
        for edge in geometry.iter_edges() {
            writeln!(f, "{:?}", debug_with(debug_edge(geometry, edge)))?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! dbg_node {
    ($geometry:expr, $node:expr) => {
        $crate::debug::debug_with($crate::debug::debug_node($geometry, $node))
    };
}

pub fn debug_node<'a>(
    geometry: &'a Geometry,
    node: &'a Node,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + 'a {
    move |f| {
        write!(f, "{}", Style::new().reset_prefix().paint(""))?;
        write!(
            f,
            "{}{}:",
            type_name!("N"),
            type_id!(node.id)
        )?;
        write!(
            f,
            "  {}  -> [{}]",
            Style::new()
                .bold()
                .underline()
                .fg(Color::LightCyan)
                .paint(format!("{}", node.point)),
            node.out_edges()
                .iter()
                .map(|&e| {
                    let edge = &geometry[e];
                    origin_style(edge.origin).paint(format!(
                        "{}{}",
                        type_id!("t", edge.target),
                        if edge.is_used() { "*" } else { "" }
                    )).to_string()
                })
                .join(", ")
        )
    }
}

#[macro_export]
macro_rules! dbg_points {
    ($points:expr) => {
        $crate::debug::debug_with($crate::debug::debug_points($points))
    };
}

/// A closed loop of points, one per line.
pub fn debug_points(
    points: &[IntPoint],
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    move |f| {
        write!(f, "{}", STYLE_LABEL.paint(format!("{} points", points.len())))?;
        for (ix, p) in points.iter().enumerate() {
            write!(f, "\n  {}", item!(format!("{}", ix), p))?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! dbg_polygon {
    ($polygon:expr) => {
        $crate::debug::debug_with($crate::debug::debug_polygon($polygon))
    };
}

pub fn debug_polygon(
    polygon: &Polygon,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    move |f| {
        write!(
            f,
            "{}({:?}) ",
            type_name!("Polygon"),
            polygon.winding_order()
        )?;
        debug_points(polygon.vertices())(f)
    }
}

#[macro_export]
macro_rules! info_label {
    ($label:literal) => {
        procr_ansi_term::Style::new()
            .bold()
            .fg(procr_ansi_term::Color::Yellow)
            .paint(format!("({})", $label))
    };
}

#[macro_export]
macro_rules! emit_info {
    (sty:$style:expr, msg:$msg:literal) => {
        tracing::info!("{}", $style.paint($msg));
    };
    (sty:$style:expr, fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!("{}", $style.paint(format!($fmt, $($rest)*)));
    };
    (fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!($fmt, $($rest)*);
    };
}

#[macro_export]
macro_rules! emit_info_span {
    ($name:literal, sty:$style:expr, msg:$msg:literal) => {
        tracing::info_span!($name, label = %$style.paint($msg))
    };
    ($name:literal, $($fields:tt)*) => {
        tracing::info_span!($name, $($fields)*)
    };
}
