//! Plain Dart classes with hand-written `fromJson`, `toJson` and `copyWith`.
use std::fmt::{self, Write};

use super::nullable;
use crate::inference::Generation;
use crate::lower::{DartClass, quote};

pub fn emit(out: &mut String, generation: &Generation, classes: &[DartClass]) -> fmt::Result {
    if generation.root_is_array {
        writeln!(out, "// Root Type List<{}>", generation.root)?;
        writeln!(out)?;
    }
    for class in classes {
        emit_class(out, class)?;
    }
    Ok(())
}

fn emit_class(out: &mut String, class: &DartClass) -> fmt::Result {
    let name = &class.name;
    writeln!(out, "class {name} {{")?;
    for f in &class.fields {
        writeln!(out, "  final {} {};", nullable(&f.dart_type), f.name)?;
    }
    writeln!(out)?;

    // constructor
    writeln!(out, "  {name}({{")?;
    for f in &class.fields {
        writeln!(out, "    this.{},", f.name)?;
    }
    writeln!(out, "  }});")?;
    writeln!(out)?;

    // fromJson
    writeln!(out, "  factory {name}.fromJson(Map<String,dynamic> json){{")?;
    writeln!(out, "    return {name}(")?;
    for f in &class.fields {
        writeln!(out, "      {}: {},", f.name, f.decode)?;
    }
    writeln!(out, "    );")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;

    // toJson: source key, then every alias with the same value
    writeln!(out, "  Map<String,dynamic> toJson(){{")?;
    writeln!(out, "    return {{")?;
    for f in &class.fields {
        for key in std::iter::once(&f.json_key).chain(&f.aliases) {
            writeln!(out, "      {}: {},", quote(key), f.encode)?;
        }
    }
    writeln!(out, "    }};")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;

    // copyWith
    writeln!(out, "  {name} copyWith({{")?;
    for f in &class.fields {
        writeln!(out, "    {} {},", nullable(&f.dart_type), f.name)?;
    }
    writeln!(out, "  }}){{")?;
    writeln!(out, "    return {name}(")?;
    for f in &class.fields {
        writeln!(out, "      {0}: {0} ?? this.{0},", f.name)?;
    }
    writeln!(out, "    );")?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{Codegen, OutputStyle};
    use crate::inference::infer_document;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(document: serde_json::Value, root: &str) -> String {
        let g = infer_document(&document, root);
        let mut cg = Codegen::new(OutputStyle::Plain);
        cg.emit(&g).unwrap();
        cg.into_string()
    }

    #[test]
    fn product_with_nested_rating() {
        let src = render(
            json!({
                "id": 1,
                "title": "Backpack",
                "created_at": "2024-02-01T10:00:00Z",
                "rating": {"rate": 3.9, "count": 120}
            }),
            "Product",
        );
        let expected = r#"class Product {
  final int? id;
  final String? title;
  final DateTime? createdAt;
  final Rating? rating;

  Product({
    this.id,
    this.title,
    this.createdAt,
    this.rating,
  });

  factory Product.fromJson(Map<String,dynamic> json){
    return Product(
      id: (json['id'] as num?)?.toInt(),
      title: json['title'],
      createdAt: json['created_at']!=null ? DateTime.parse(json['created_at'].toString()) : null,
      rating: json['rating']!=null ? Rating.fromJson(json['rating']) : null,
    );
  }

  Map<String,dynamic> toJson(){
    return {
      'id': id,
      'title': title,
      'created_at': createdAt?.toIso8601String(),
      'rating': rating?.toJson(),
    };
  }

  Product copyWith({
    int? id,
    String? title,
    DateTime? createdAt,
    Rating? rating,
  }){
    return Product(
      id: id ?? this.id,
      title: title ?? this.title,
      createdAt: createdAt ?? this.createdAt,
      rating: rating ?? this.rating,
    );
  }
}

class Rating {
  final double? rate;
  final int? count;

  Rating({
    this.rate,
    this.count,
  });

  factory Rating.fromJson(Map<String,dynamic> json){
    return Rating(
      rate: (json['rate'] as num?)?.toDouble(),
      count: (json['count'] as num?)?.toInt(),
    );
  }

  Map<String,dynamic> toJson(){
    return {
      'rate': rate,
      'count': count,
    };
  }

  Rating copyWith({
    double? rate,
    int? count,
  }){
    return Rating(
      rate: rate ?? this.rate,
      count: count ?? this.count,
    );
  }
}

"#;
        assert_eq!(src, expected);
    }

    #[test]
    fn aliases_are_read_first_and_written_back() {
        let src = render(json!([{"_id": "a", "id": "b", "note": null}]), "Doc");
        assert!(src.starts_with("// Root Type List<Doc>\n\nclass Doc {\n"));
        assert!(src.contains("  final String? id;\n"));
        assert!(src.contains("  final dynamic note;\n"));
        assert!(src.contains("      id: json['id'] ?? json['_id'],\n"));
        assert!(src.contains("      '_id': id,\n      'id': id,\n"));
    }

    #[test]
    fn empty_class_still_compiles_shape() {
        let src = render(json!({}), "Empty");
        assert!(src.contains("  Empty({\n  });\n"));
        assert!(src.contains("    return {\n    };\n"));
    }
}
