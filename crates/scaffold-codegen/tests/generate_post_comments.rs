use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use scaffold_codegen::*;
use scaffold_core::{expand, Document, ExpandOptions, Expansion, JobKind, Schedule};
use std::fs;
use std::path::Path;

const POST_WITH_COMMENTS: &str = r#"[[{
    "name": "Posts",
    "fields": "title#string;body#text",
    "validations": "title#required|max:255",
    "data": { "fields": [
        { "name": "comments", "type": "OneToMany", "entity": {
            "name": "Comments",
            "fields": "body#text",
            "validations": "body#required"
        } }
    ] }
}]]"#;

fn expansion() -> Expansion {
    let document = Document::from_json(POST_WITH_COMMENTS).unwrap();
    expand(&document, &ExpandOptions::default())
}

fn run(root: &Path) -> Report {
    fs::create_dir_all(root.join("routes")).unwrap();
    fs::write(root.join("routes/web.php"), "<?php\n").unwrap();
    run_again(root)
}

fn run_again(root: &Path) -> Report {
    let expansion = expansion();
    let base = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let schedule = Schedule::new(&expansion, base);

    let mut dispatcher = Dispatcher::new(Options::new().root(root)).unwrap();
    dispatcher.run(&schedule).unwrap()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(dir.path());

    let mut paths: Vec<_> = report
        .written()
        .filter(|outcome| outcome.target != Target::Route)
        .map(|outcome| outcome.path.to_string_lossy().into_owned())
        .collect();
    paths.sort();

    assert_eq!(
        paths,
        [
            "app/Comment.php",
            "app/Http/Controllers/CommentsController.php",
            "app/Http/Controllers/PostsController.php",
            "app/Post.php",
            "database/migrations/2024_01_31_120000_create_posts_table.php",
            "database/migrations/2024_01_31_120001_create_comments_table.php",
            "resources/views/comments/create.blade.php",
            "resources/views/comments/edit.blade.php",
            "resources/views/comments/form.blade.php",
            "resources/views/comments/index.blade.php",
            "resources/views/comments/show.blade.php",
            "resources/views/posts/create.blade.php",
            "resources/views/posts/edit.blade.php",
            "resources/views/posts/form.blade.php",
            "resources/views/posts/index.blade.php",
            "resources/views/posts/show.blade.php",
        ]
    );
    assert!(report.diagnostics.iter().all(|d| !d.error.is_class_already_exists()));
}

#[test]
fn child_output_is_written_first() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(dir.path());

    let first_post = report
        .outcomes
        .iter()
        .position(|outcome| outcome.entity == "Posts")
        .unwrap();
    assert!(report.outcomes[..first_post]
        .iter()
        .all(|outcome| outcome.entity == "Comments"));
    assert_eq!(report.outcomes[0].target, Target::Job(JobKind::View));
}

#[test]
fn models_carry_both_sides_of_the_relationship() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path());

    let post = read(dir.path(), "app/Post.php");
    assert!(post.contains("namespace App;"));
    assert!(post.contains("protected $table = 'posts';"));
    assert!(post.contains("protected $fillable = ['title', 'body'];"));
    assert!(post.contains(
        "    public function comments()\n    {\n        return $this->hasMany('App\\Comment', 'post_id', 'id');\n    }"
    ));

    let comment = read(dir.path(), "app/Comment.php");
    assert!(comment.contains("protected $fillable = ['post_id', 'body'];"));
    assert!(comment.contains("return $this->belongsTo('App\\Post', 'post_id', 'id');"));
}

#[test]
fn child_migration_references_parent_table() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path());

    let migration = read(
        dir.path(),
        "database/migrations/2024_01_31_120001_create_comments_table.php",
    );
    assert!(migration.contains("class CreateCommentsTable extends Migration"));
    let schema = [
        "$table->increments('id');",
        "$table->timestamps();",
        "$table->integer('post_id')->unsigned();",
        "$table->text('body');",
        "$table->foreign('post_id')->references('id')->on('posts')->onDelete('cascade')->onUpdate('cascade');",
    ]
    .map(|line| format!("            {line}"))
    .join("\n");
    assert!(migration.contains(&schema));
    assert!(migration.contains("Schema::drop('comments');"));
}

#[test]
fn child_controller_uses_parent_aware_create() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path());

    let comments = read(dir.path(), "app/Http/Controllers/CommentsController.php");
    assert!(comments.contains("namespace App\\Http\\Controllers;"));
    assert!(comments.contains("use App\\Comment;"));
    assert!(comments.contains("use App\\Post as ParentModel;"));
    assert!(comments.contains("$parent = ParentModel::findOrFail($request->get('post_id'));"));
    assert!(comments.contains("'body' => 'required'"));
    assert!(comments.contains("$perPage = 25;"));

    let posts = read(dir.path(), "app/Http/Controllers/PostsController.php");
    assert!(!posts.contains("ParentModel"));
    assert!(posts.contains("public function create()\n    {\n        return view('posts.create');\n    }"));
    assert!(posts.contains("$this->validate($request, [\n            'title' => 'required|max:255'\n        ]);"));
    assert!(posts.contains("return view('posts.index', compact('posts'));"));
}

#[test]
fn views_follow_field_visibility() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path());

    let index = read(dir.path(), "resources/views/comments/index.blade.php");
    assert!(index.contains("<th>#</th><th>Body</th><th>Actions</th>"));
    assert!(index.contains("<td>{{ $item->body }}</td>"));
    assert!(index.contains("@foreach($comments as $item)"));
    assert!(index.contains("{{ url('/comments/' . $item->id) }}"));

    let form = read(dir.path(), "resources/views/comments/form.blade.php");
    assert!(!form.contains("post_id"));
    assert!(form.contains("Form::textarea('body', null, ['class' => 'form-control', 'required' => 'required'])"));

    let create = read(dir.path(), "resources/views/comments/create.blade.php");
    assert!(create.contains("{!! Form::hidden('post_id', $parent->id) !!}"));
    assert!(create.contains("@include ('comments.form')"));

    let show = read(dir.path(), "resources/views/comments/show.blade.php");
    assert!(show.contains("<tr><th> Post Id </th><td> {{ $comment->post_id }} </td></tr>"));

    let edit = read(dir.path(), "resources/views/posts/edit.blade.php");
    assert!(edit.contains("Edit Post #{{ $post->id }}"));
}

#[test]
fn routes_are_appended_once() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path());

    let expected = "<?php\n\
                    Route::resource('comments', 'CommentsController');\n\
                    Route::resource('posts', 'PostsController');\n";
    assert_eq!(read(dir.path(), "routes/web.php"), expected);

    // A second run keeps existing files and does not duplicate routes
    let report = run_again(dir.path());
    assert_eq!(read(dir.path(), "routes/web.php"), expected);
    assert_eq!(report.written().count(), 0);
    assert_eq!(
        report
            .diagnostics
            .iter()
            .filter(|d| d.error.is_class_already_exists())
            .count(),
        4
    );
}

#[test]
fn localized_views_use_translation_keys() {
    let dir = tempfile::tempdir().unwrap();
    let document = Document::from_json(
        r#"[[{ "name": "Posts", "fields": "title#string", "localize": "yes" }]]"#,
    )
    .unwrap();
    let expansion = expand(&document, &ExpandOptions::default());
    let base = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let schedule = Schedule::new(&expansion, base);

    let mut dispatcher = Dispatcher::new(Options::new().root(dir.path())).unwrap();
    dispatcher.run(&schedule).unwrap();

    let index = read(dir.path(), "resources/views/posts/index.blade.php");
    assert!(index.contains("<th>{{ trans('posts.title') }}</th>"));

    let show = read(dir.path(), "resources/views/posts/show.blade.php");
    assert!(show.contains("<tr><th> {{ trans('posts.title') }} </th>"));

    let form = read(dir.path(), "resources/views/posts/form.blade.php");
    assert!(form.contains("Form::label('title', trans('posts.title'), ['class' => 'control-label'])"));
}
